use chrono::{DateTime, Utc};
use crossga_training::search::RunSummary;
use serde::{Deserialize, Serialize};

/// One line of the results log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ResultRecord {
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: RunSummary,
}

impl ResultRecord {
    pub(crate) fn new(summary: RunSummary) -> Self {
        Self {
            finished_at: Utc::now(),
            summary,
        }
    }
}
