use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use crossga_engine::{Chromosome, FitnessEvaluator, Validator, Vocabulary, words};

use super::solve::DEFAULT_DICTIONARY;
use crate::{config::Settings, dictionary};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckArg {
    /// Grid rows separated by '/', e.g. "ca/rt"
    #[arg(long)]
    grid: String,
    /// Settings file (TOML); only the alphabet and scoring sections are used
    #[arg(long)]
    config: Option<PathBuf>,
    /// Word list, one word per line
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let CheckArg {
        grid,
        config,
        dictionary,
    } = arg;
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let alphabet = settings.build_alphabet()?;
    let rows: Vec<&str> = grid.split('/').collect();
    let grid = Chromosome::from_rows(&alphabet, rows.as_slice())
        .with_context(|| format!("Invalid grid: {grid}"))?;
    let vocabulary =
        dictionary::read_dictionary_file(dictionary, &alphabet, grid.shape().max_word_len())?;

    write_report(&mut io::stdout().lock(), &grid, &vocabulary, &settings)?;
    Ok(())
}

fn write_report<W>(
    out: &mut W,
    grid: &Chromosome,
    vocabulary: &Vocabulary,
    settings: &Settings,
) -> anyhow::Result<()>
where
    W: Write,
{
    let block = settings.alphabet.block;
    let evaluator = FitnessEvaluator::new(vocabulary, block, settings.scoring);
    let validator = Validator::new(vocabulary, block);

    writeln!(out, "{grid}")?;
    writeln!(out)?;
    let height = grid.shape().height;
    for (i, line) in grid.lines().enumerate() {
        let label = if i < height {
            format!("row {i}")
        } else {
            format!("col {}", i - height)
        };
        let verdict = if validator.crossline_valid(&line) {
            "ok"
        } else {
            "invalid"
        };
        let scored = words::split_words(&line, block)
            .map(|word| format!("{word}={}", evaluator.word_fitness(word)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{label:<7} {line}  {verdict:<7} fitness={} {scored}",
            evaluator.crossline_fitness(&line),
        )?;
    }
    writeln!(out)?;
    writeln!(out, "total fitness: {}", evaluator.crossword_fitness(grid))?;
    let unknown: Vec<String> = grid
        .lines()
        .flat_map(|line| {
            validator
                .unknown_words(&line)
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect();
    if unknown.is_empty() {
        writeln!(out, "valid crossword")?;
    } else {
        writeln!(out, "not a valid crossword; unknown words: {}", unknown.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rows: &[&str], words: &[&str]) -> String {
        let settings =
            Settings::parse("[alphabet]\nblock = \"#\"\nletters = \"acdgort\"\n").unwrap();
        let alphabet = settings.build_alphabet().unwrap();
        let grid = Chromosome::from_rows(&alphabet, rows).unwrap();
        let (vocabulary, _) = Vocabulary::from_words(words, &alphabet, 7);
        let mut out = vec![];
        write_report(&mut out, &grid, &vocabulary, &settings).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_valid_grid() {
        let text = report(&["ca", "rt"], &["ca", "rt", "cr", "at"]);
        assert!(text.starts_with("ca\nrt\n"));
        assert!(text.contains("total fitness: 8\n"));
        assert!(text.ends_with("valid crossword\n"));
        assert_eq!(text.matches(" ok ").count(), 4);
    }

    #[test]
    fn test_report_lists_unknown_words() {
        let text = report(&["ca", "rt"], &["ca", "rt"]);
        assert!(text.contains("total fitness: 4\n"));
        assert!(text.ends_with("not a valid crossword; unknown words: cr, at\n"));
    }
}
