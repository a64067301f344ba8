use serde::{Deserialize, Serialize};

/// One item stack inside a kill record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub name: String,
    pub id: i32,
    pub quantity: u32,
    pub price: i64, // unit price when captured, 0 if unknown
}

impl ItemEntry {
    pub fn new(id: i32, name: impl Into<String>, quantity: u32, price: i64) -> Self {
        Self {
            name: name.into(),
            id,
            quantity,
            price,
        }
    }

    pub fn total_value(&self) -> i64 {
        self.quantity as i64 * self.price
    }
}
