use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one pipeline execution. Written once at the end of a run and
/// never mutated; the run_log table accumulates these for trend reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub total_found: usize,
    pub new_jobs: usize,
    pub sources_queried: usize,
    pub per_source: BTreeMap<String, usize>,
}

/// A persisted run_log row. per_source is stored as serialized JSON.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RunLogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub total_found: i64,
    pub new_jobs: i64,
    pub per_source: String,
}

impl RunLogEntry {
    pub fn per_source_counts(&self) -> BTreeMap<String, usize> {
        serde_json::from_str(&self.per_source).unwrap_or_default()
    }
}
