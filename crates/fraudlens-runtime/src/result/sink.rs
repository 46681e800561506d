//! Result sinks

use super::DecisionRecord;
use crate::error::Result;
use std::sync::{Mutex, MutexGuard};

/// Destination for decision records
///
/// Recording must not block scoring; implementations either store in memory
/// or queue the record for a background writer.
pub trait ResultSink: Send + Sync {
    fn record(&self, record: DecisionRecord) -> Result<()>;
}

/// Keeps every record in memory
#[derive(Debug, Default)]
pub struct InMemoryResultSink {
    records: Mutex<Vec<DecisionRecord>>,
}

impl InMemoryResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far, oldest first
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DecisionRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultSink for InMemoryResultSink {
    fn record(&self, record: DecisionRecord) -> Result<()> {
        self.lock().push(record);
        Ok(())
    }
}
