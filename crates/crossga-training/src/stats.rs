/// Summary of one generation's fitness distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    /// Highest fitness in the generation.
    pub best: f64,
    /// Lowest fitness in the generation.
    pub worst: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl FitnessStats {
    /// Computes statistics from fitness values in any order.
    ///
    /// Returns `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crossga_training::stats::FitnessStats;
    /// let stats = FitnessStats::new([2.0, 8.0, 5.0]).unwrap();
    /// assert_eq!(stats.best, 8.0);
    /// assert_eq!(stats.worst, 2.0);
    /// assert_eq!(stats.mean, 5.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let best = values.iter().copied().max_by(f64::total_cmp)?;
        let worst = values.iter().copied().min_by(f64::total_cmp)?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            best,
            worst,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
