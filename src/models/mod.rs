pub mod item;
pub mod record;
pub mod legacy;
pub mod settings;
pub mod consolidation;

pub use item::ItemEntry;
pub use record::{KillRecord, UNKNOWN};
pub use legacy::{LegacyItemEntry, LegacyKillRecord};
pub use settings::StoreSettings;
pub use consolidation::{consolidate, sorted_by_value, EntitySummary};
