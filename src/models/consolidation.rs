use std::collections::HashMap;
use crate::models::item::ItemEntry;
use crate::models::record::KillRecord;

/// Sums item quantities by id across `records`.
///
/// Name and price come from the last entry seen for each id, so callers that
/// pass records in append order get the most recent metadata. Input entries
/// are left untouched.
pub fn consolidate<'a, I>(records: I) -> HashMap<i32, ItemEntry>
where
    I: IntoIterator<Item = &'a KillRecord>,
{
    let mut totals: HashMap<i32, ItemEntry> = HashMap::new();

    for item in records.into_iter().flat_map(|record| record.drops.iter()) {
        match totals.get_mut(&item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                existing.name = item.name.clone();
                existing.price = item.price;
            }
            None => {
                totals.insert(item.id, item.clone());
            }
        }
    }

    totals
}

/// Orders a consolidation result by total value, highest first, ties broken by item id.
pub fn sorted_by_value(totals: &HashMap<i32, ItemEntry>) -> Vec<ItemEntry> {
    let mut items: Vec<ItemEntry> = totals.values().cloned().collect();
    items.sort_by(|a, b| b.total_value().cmp(&a.total_value()).then(a.id.cmp(&b.id)));
    items
}

/// Aggregate view of one entity's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub entity: String,
    pub record_count: usize,
    pub highest_kill_count: Option<i32>,
    pub total_value: i64,
    pub items: Vec<ItemEntry>,
}

impl EntitySummary {
    pub fn from_records(entity: impl Into<String>, records: &[KillRecord]) -> Self {
        let totals = consolidate(records);
        let items = sorted_by_value(&totals);
        Self {
            entity: entity.into(),
            record_count: records.len(),
            highest_kill_count: records.iter().filter_map(KillRecord::known_kill_count).max(),
            total_value: items.iter().map(ItemEntry::total_value).sum(),
            items,
        }
    }
}
