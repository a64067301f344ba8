use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use crate::{consolidate, ItemEntry, KillRecord, LootRecordStore, StoreCommand, StoreWorker, UNKNOWN};

fn zulrah_kill(kill_count: i32, drops: Vec<ItemEntry>) -> KillRecord {
    KillRecord::new(2042, "Zulrah", 725, kill_count, drops)
}

#[test]
fn test_session_of_kills_consolidates_per_entity() {
    let dir = TempDir::new().unwrap();
    let store = LootRecordStore::open(dir.path(), Some("Zezima"));

    store.append(&zulrah_kill(1, vec![ItemEntry::new(1, "Zulrah's scales", 3, 10), ItemEntry::new(2, "Onyx bolt tips", 1, 5)]));
    store.append(&KillRecord::new(8061, "Vorkath", 732, 1, vec![ItemEntry::new(1, "Zulrah's scales", 100, 11)]));
    store.append(&zulrah_kill(2, vec![ItemEntry::new(1, "Zulrah's scales", 2, 12)]));

    let totals = consolidate(&store.load("Zulrah"));

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[&1].quantity, 5);
    assert_eq!(totals[&1].price, 12);
    assert_eq!(totals[&2].quantity, 1);
    assert_eq!(totals[&2].price, 5);

    let everything = consolidate(&store.load_all());
    assert_eq!(everything[&1].quantity, 105);
}

#[test]
fn test_late_pet_lands_on_last_kill() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(LootRecordStore::open(dir.path(), None));
    let worker = StoreWorker::spawn(store.clone()).unwrap();

    worker.submit(StoreCommand::Append(zulrah_kill(41, vec![ItemEntry::new(12934, "Zulrah's scales", 120, 160)])));
    worker.submit(StoreCommand::Append(zulrah_kill(42, vec![ItemEntry::new(12934, "Zulrah's scales", 80, 160)])));
    worker.submit(StoreCommand::AmendLast {
        entity: "zulrah".to_string(),
        drops: vec![ItemEntry::new(12921, "Pet snakeling", 1, 0)],
    });
    worker.shutdown();

    let records = store.load("Zulrah");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].drops.len(), 1);
    assert_eq!(records[1].kill_count, 42);
    assert_eq!(records[1].drops[1], ItemEntry::new(12921, "Pet snakeling", 1, 0));
}

#[test]
fn test_clearing_a_boss_keeps_the_others() {
    let dir = TempDir::new().unwrap();
    let store = LootRecordStore::open(dir.path(), None);

    store.append(&zulrah_kill(1, Vec::new()));
    store.append(&KillRecord::new(8061, "Vorkath", 732, 1, Vec::new()));
    store.append(&KillRecord::for_event("Barrows", UNKNOWN, vec![ItemEntry::new(4708, "Ahrim's hood", 1, 90_000)]));

    assert!(store.delete("Vorkath"));

    assert_eq!(
        store.list_known_entities(),
        BTreeSet::from(["barrows".to_string(), "zulrah".to_string()])
    );
    assert_eq!(store.load_all().len(), 2);
}

#[test]
fn test_legacy_file_loads_then_migrates_in_place() {
    let dir = TempDir::new().unwrap();
    let store = LootRecordStore::open(dir.path(), Some("Lynx Titan"));
    let path = dir.path().join("Lynx Titan").join("barrows.log");
    fs::write(
        &path,
        concat!(
            "{\"npcName\":\"Barrows\",\"killCount\":10,\"drops\":[{\"id\":4708,\"name\":\"Ahrim's hood\",\"amount\":1,\"price\":90000}]}\n",
            "this line was cut off by a crash\n",
            "{\"npcName\":\"Barrows\",\"drops\":[{\"id\":558,\"amount\":250}]}\n",
        ),
    )
    .unwrap();

    let loaded = store.load("Barrows");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].kill_count, UNKNOWN);
    assert_eq!(loaded[1].drops[0], ItemEntry::new(558, "", 250, 0));

    assert!(store.needs_migration("Barrows"));
    assert!(store.migrate("Barrows"));

    assert!(!store.needs_migration("Barrows"));
    assert_eq!(store.load("Barrows"), loaded);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn test_reopening_store_sees_previous_session() {
    let dir = TempDir::new().unwrap();
    let record = zulrah_kill(500, vec![ItemEntry::new(12936, "Jar of swamp", 1, 0)]);

    {
        let store = LootRecordStore::open(dir.path(), Some("Zezima"));
        store.append(&record);
    }

    let store = LootRecordStore::open(dir.path(), Some("Zezima"));
    assert_eq!(store.list_known_entities(), BTreeSet::from(["zulrah".to_string()]));
    assert_eq!(store.load("zulrah"), vec![record]);
}
