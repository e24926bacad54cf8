use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context as _;
use crossga_engine::{GeneAlphabet, Vocabulary};

/// Reads a word list (one word per line) into a [`Vocabulary`].
///
/// Words longer than `max_len` or containing symbols outside `alphabet` are
/// dropped.
pub(crate) fn read_dictionary_file<P>(
    path: P,
    alphabet: &GeneAlphabet,
    max_len: usize,
) -> anyhow::Result<Vocabulary>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open dictionary file: {}", path.display()))?;
    read_dictionary(BufReader::new(file), alphabet, max_len)
        .with_context(|| format!("Failed to read dictionary file: {}", path.display()))
}

pub(crate) fn read_dictionary<R>(
    reader: R,
    alphabet: &GeneAlphabet,
    max_len: usize,
) -> anyhow::Result<Vocabulary>
where
    R: BufRead,
{
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    let (vocabulary, stats) = Vocabulary::from_words(&lines, alphabet, max_len);
    log::info!(
        "Read {} words from {} lines ({} longer than {max_len}, {} with other symbols)",
        stats.kept,
        lines.len(),
        stats.too_long,
        stats.foreign,
    );
    if vocabulary.is_empty() {
        log::warn!("Dictionary contains no usable words; no grid can score above zero");
    }
    Ok(vocabulary)
}
