use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// One record per query run; kept only for the session.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub label: String,
    pub sql: String,
    pub elapsed: Duration,
    pub success: bool,
    pub row_count: usize,
    pub started_at: DateTime<Utc>,
}

impl ExecutionRecord {
    pub fn new(
        label: impl Into<String>,
        sql: impl Into<String>,
        elapsed: Duration,
        success: bool,
        row_count: usize,
    ) -> Self {
        Self {
            label: label.into(),
            sql: sql.into(),
            elapsed,
            success,
            row_count,
            started_at: Utc::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Session-scoped execution log, insertion-ordered. Passed explicitly to
/// whoever needs it; there is no ambient global store.
#[derive(Debug, Default)]
pub struct History {
    records: Vec<ExecutionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: ExecutionRecord) {
        self.records.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ExecutionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
