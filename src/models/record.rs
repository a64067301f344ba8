use serde::{Deserialize, Serialize};
use crate::models::item::ItemEntry;

/// Marker for an id, level or kill count that was not known at capture time.
pub const UNKNOWN: i32 = -1;

/// A single kill or reward capture for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRecord {
    pub id: i32,
    pub name: String,
    pub level: i32,
    #[serde(rename = "killCount")]
    pub kill_count: i32,
    pub drops: Vec<ItemEntry>,
}

impl KillRecord {
    pub fn new(id: i32, name: impl Into<String>, level: i32, kill_count: i32, drops: Vec<ItemEntry>) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            kill_count,
            drops,
        }
    }

    /// Record for an event or player kill, where there is no npc id or level.
    pub fn for_event(name: impl Into<String>, kill_count: i32, drops: Vec<ItemEntry>) -> Self {
        Self::new(UNKNOWN, name, UNKNOWN, kill_count, drops)
    }

    pub fn known_kill_count(&self) -> Option<i32> {
        (self.kill_count != UNKNOWN).then_some(self.kill_count)
    }

    pub fn known_level(&self) -> Option<i32> {
        (self.level != UNKNOWN).then_some(self.level)
    }

    pub fn total_value(&self) -> i64 {
        self.drops.iter().map(ItemEntry::total_value).sum()
    }
}
