use std::io::{self, Write as _};

use crate::config::Settings;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DefaultConfigArg {}

pub(crate) fn run(_arg: &DefaultConfigArg) -> anyhow::Result<()> {
    let text = Settings::default().to_toml()?;
    io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}
