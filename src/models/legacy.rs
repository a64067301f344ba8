use serde::Deserialize;
use crate::models::item::ItemEntry;
use crate::models::record::{KillRecord, UNKNOWN};

fn unknown() -> i32 {
    UNKNOWN
}

/// Item layout written by older versions of the logger.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyItemEntry {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub price: i64,
}

/// Record layout written by older versions of the logger.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyKillRecord {
    #[serde(rename = "npcID", default = "unknown")]
    pub npc_id: i32,
    #[serde(rename = "npcName")]
    pub npc_name: String,
    #[serde(rename = "npcLevel", default = "unknown")]
    pub npc_level: i32,
    #[serde(rename = "killCount", default = "unknown")]
    pub kill_count: i32,
    #[serde(default)]
    pub drops: Vec<LegacyItemEntry>,
}

impl From<LegacyItemEntry> for ItemEntry {
    fn from(legacy: LegacyItemEntry) -> Self {
        ItemEntry::new(legacy.id, legacy.name, legacy.amount, legacy.price)
    }
}

impl From<LegacyKillRecord> for KillRecord {
    fn from(legacy: LegacyKillRecord) -> Self {
        KillRecord::new(
            legacy.npc_id,
            legacy.npc_name,
            legacy.npc_level,
            legacy.kill_count,
            legacy.drops.into_iter().map(ItemEntry::from).collect(),
        )
    }
}
