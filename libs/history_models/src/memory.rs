use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::HistoryStoreResult;
use crate::models::HistoryRecord;
use crate::store::HistoryStore;

/// Process-local history, handy for tests and for running without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<RwLock<Vec<HistoryRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        MemoryHistoryStore {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        MemoryHistoryStore {
            inner: Arc::new(RwLock::new(records)),
        }
    }

    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.inner.read().clone()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn read_all(&self) -> HistoryStoreResult<Vec<HistoryRecord>> {
        Ok(self.snapshot())
    }

    async fn write_all(
        &self,
        records: &[HistoryRecord],
    ) -> HistoryStoreResult<()> {
        *self.inner.write() = records.to_vec();
        Ok(())
    }
}
