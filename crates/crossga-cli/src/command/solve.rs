use std::path::PathBuf;

use crossga_training::{
    breeding::CrossoverPolicy,
    params::GeneSampling,
    search::{GenerationProgress, Search, SearchObserver},
    selection::SelectionPolicy,
};

use crate::{config::Settings, dictionary, record::ResultRecord, util::Output};

pub(crate) const DEFAULT_DICTIONARY: &str = "da_DK.dic.txt";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Word list, one word per line
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,
    /// Append the run summary as one JSON line to this file (stdout if omitted)
    #[arg(long)]
    results: Option<PathBuf>,
    #[clap(flatten)]
    pub(crate) overrides: SettingsOverrides,
}

impl Default for SolveArg {
    fn default() -> Self {
        Self {
            config: None,
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            results: None,
            overrides: SettingsOverrides::default(),
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SettingsOverrides {
    #[arg(long)]
    pub(crate) height: Option<usize>,
    #[arg(long)]
    pub(crate) width: Option<usize>,
    /// Gene pool size
    #[arg(long)]
    pub(crate) population: Option<usize>,
    /// Gene sampling (weighted or uniform)
    #[arg(long)]
    pub(crate) sampling: Option<GeneSampling>,
    #[arg(long)]
    pub(crate) max_generations: Option<usize>,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Parent selection (roulette or quick)
    #[arg(long)]
    pub(crate) selection: Option<SelectionPolicy>,
    /// Crossover mode (mixed, linear or column_wise)
    #[arg(long)]
    pub(crate) crossover: Option<CrossoverPolicy>,
    #[arg(long)]
    pub(crate) report_interval: Option<usize>,
}

impl SettingsOverrides {
    pub(crate) fn apply(&self, settings: &mut Settings) {
        let Self {
            height,
            width,
            population,
            sampling,
            max_generations,
            seed,
            selection,
            crossover,
            report_interval,
        } = self;
        let algorithm = &mut settings.algorithm;
        if let Some(height) = *height {
            settings.grid.height = height;
        }
        if let Some(width) = *width {
            settings.grid.width = width;
        }
        if let Some(population) = *population {
            algorithm.gene_pool_size = population;
        }
        if let Some(sampling) = *sampling {
            algorithm.sampling = sampling;
        }
        if let Some(max_generations) = *max_generations {
            algorithm.max_generations = max_generations;
        }
        if seed.is_some() {
            algorithm.seed = *seed;
        }
        if let Some(selection) = *selection {
            algorithm.selection = selection;
        }
        if let Some(crossover) = *crossover {
            algorithm.crossover = crossover;
        }
        if let Some(report_interval) = *report_interval {
            algorithm.report_interval = report_interval;
        }
    }
}

/// Logs progress events.
#[derive(Debug, Default)]
struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_progress(&mut self, progress: &GenerationProgress) {
        log::info!(
            "generation {} - best fitness={:.3} - average fitness={:.3}",
            progress.generation,
            progress.best_fitness,
            progress.average_fitness,
        );
        if let Some(stats) = &progress.stats {
            log::debug!(
                "generation {} - worst={:.3} - std dev={:.3}",
                progress.generation,
                stats.worst,
                stats.std_dev,
            );
        }
    }
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let SolveArg {
        config,
        dictionary,
        results,
        overrides,
    } = arg;

    let mut settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    overrides.apply(&mut settings);

    let alphabet = settings.build_alphabet()?;
    let params = settings.build_params()?;
    let vocabulary =
        dictionary::read_dictionary_file(dictionary, &alphabet, params.shape.max_word_len())?;

    let mut search = match settings.algorithm.seed {
        Some(seed) => Search::with_seed(params, alphabet, &vocabulary, seed),
        None => Search::new(params, alphabet, &vocabulary),
    };
    log::info!(
        "Searching for a {} grid with {} chromosomes ({:?} genes, seed {})",
        search.params().shape,
        search.params().gene_pool_size,
        search.params().sampling,
        search.seed(),
    );

    let outcome = search.run(&mut LogObserver);
    if outcome.is_solved() {
        log::info!("Found a valid grid at generation {}", outcome.generation);
    } else {
        log::warn!(
            "No valid grid found ({}) after {} generations; best fitness={:.3}",
            outcome.termination,
            outcome.generations(),
            outcome.best_fitness,
        );
    }
    println!("{}", outcome.best);

    let record = ResultRecord::new(search.summarize(&outcome));
    Output::append_json(&record, results.clone())?;
    if let Some(path) = results {
        log::info!("Appended run summary to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let mut settings = Settings::default();
        settings.algorithm.seed = Some(1);
        let overrides = SettingsOverrides {
            height: Some(3),
            population: Some(40),
            selection: Some(SelectionPolicy::Quick),
            ..Default::default()
        };
        overrides.apply(&mut settings);
        assert_eq!(settings.grid.height, 3);
        assert_eq!(settings.grid.width, 4);
        assert_eq!(settings.algorithm.gene_pool_size, 40);
        assert_eq!(settings.algorithm.selection, SelectionPolicy::Quick);
        // untouched
        assert_eq!(settings.algorithm.seed, Some(1));
    }

    #[test]
    fn test_solve_appends_record() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = dir.path().join("words.txt");
        std::fs::write(&dictionary, "aa\nab\nba\nbb\n").unwrap();
        let config = dir.path().join("crossga.toml");
        std::fs::write(
            &config,
            concat!(
                "[alphabet]\nblock = \"#\"\nletters = \"ab\"\n\n",
                "[algorithm]\ngene_pool_size = 10\nelite_count = 1\nnew_count = 2\n",
                "max_generations = 5\n",
            ),
        )
        .unwrap();
        let results = dir.path().join("results.jsonl");

        let arg = SolveArg {
            config: Some(config),
            dictionary,
            results: Some(results.clone()),
            overrides: SettingsOverrides {
                height: Some(2),
                width: Some(2),
                seed: Some(42),
                ..Default::default()
            },
        };
        run(&arg).unwrap();

        let text = std::fs::read_to_string(&results).unwrap();
        let record: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(record["seed"], 42);
        assert_eq!(record["solved"], true);
        assert_eq!(record["termination"], "solved");
        assert_eq!(record["params"]["sampling"], "weighted");
        assert_eq!(record["params"]["block_probability"], 0.05);
        assert_eq!(record["grid"].as_array().unwrap().len(), 2);
        assert!(record["finished_at"].is_string());
    }
}
