use clap::{Parser, Subcommand};

use self::{check::CheckArg, default_config::DefaultConfigArg, solve::SolveArg};

mod check;
mod default_config;
mod solve;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for a valid crossword grid using a genetic algorithm
    Solve(#[clap(flatten)] SolveArg),
    /// Score and validate a given grid against the dictionary
    Check(#[clap(flatten)] CheckArg),
    /// Print the default settings as TOML
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Solve(SolveArg::default())) {
        Mode::Solve(arg) => solve::run(&arg)?,
        Mode::Check(arg) => check::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
    }
    Ok(())
}
