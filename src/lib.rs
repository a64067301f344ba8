//! Per-entity kill and loot logs stored as one JSON record per line.

pub mod error;
pub mod logging;
pub mod models;
pub mod parsing;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test;

pub use error::StoreError;
pub use models::{consolidate, EntitySummary, ItemEntry, KillRecord, StoreSettings, UNKNOWN};
pub use storage::{LootRecordStore, StorageContext, StoreCommand, StoreWorker};
