pub mod error;
pub mod memory;
pub mod models;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{HistoryStoreError, HistoryStoreResult};
pub use memory::MemoryHistoryStore;
pub use models::{ForecastEntry, HistoryRecord};
pub use store::{HistoryStore, JsonFileHistoryStore};
