pub mod context;
pub mod finder;
pub mod store;
pub mod worker;

pub use context::{StorageContext, entity_key};
pub use finder::find_entity_logs_in_dir;
pub use store::LootRecordStore;
pub use worker::{StoreCommand, StoreWorker};
