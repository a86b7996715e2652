use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{HistoryStoreError, HistoryStoreResult};
use crate::models::HistoryRecord;

/// Whole-file persistence for the search history.
///
/// Implementations never cache: every call observes or replaces the full
/// sequence.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn read_all(&self) -> HistoryStoreResult<Vec<HistoryRecord>>;

    async fn write_all(
        &self,
        records: &[HistoryRecord],
    ) -> HistoryStoreResult<()>;
}

/// History kept as a JSON array in a single file.
///
/// Writes go to a sibling `*.tmp` file which is then renamed over the target,
/// so readers see either the old or the new array and never a torn write.
/// The store does not serialize writers; callers doing read-modify-write must
/// hold their own lock.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    fn write_error(&self, source: std::io::Error) -> HistoryStoreError {
        HistoryStoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn read_all(&self) -> HistoryStoreResult<Vec<HistoryRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "History file not found, starting with empty history"
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(HistoryStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| {
            HistoryStoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })
    }

    async fn write_all(
        &self,
        records: &[HistoryRecord],
    ) -> HistoryStoreResult<()> {
        let payload = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let temp_path = self.temp_path();
        let replaced = async {
            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(&payload).await?;
            file.sync_all().await?;
            drop(file);

            tokio::fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(e) = replaced {
            // Best effort; the write error is what the caller needs.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.write_error(e));
        }

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "History file written"
        );

        Ok(())
    }
}
