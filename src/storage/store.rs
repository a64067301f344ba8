use std::collections::{BTreeSet, HashMap};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};
use crate::error::StoreError;
use crate::models::{consolidate, EntitySummary, ItemEntry, KillRecord, UNKNOWN};
use crate::parsing::{parse_record_line, serialize_record, ParsedRecord, RecordFormat};
use crate::storage::context::StorageContext;
use crate::storage::finder::find_entity_logs_in_dir;

/// Per-entity, append-mostly log of kill records.
///
/// Every operation takes the same lock, so writes to one file never interleave
/// and a load never observes a half-finished rewrite. The non-`try_` methods
/// log failures and return `false` or an empty result instead of an error,
/// which keeps event handlers running when the disk misbehaves.
#[derive(Debug)]
pub struct LootRecordStore {
    context: Mutex<StorageContext>,
}

impl LootRecordStore {
    pub fn new(context: StorageContext) -> Self {
        Self {
            context: Mutex::new(context),
        }
    }

    /// Store rooted at `root`, with the directory for `identity` already created.
    pub fn open(root: impl Into<PathBuf>, identity: Option<&str>) -> Self {
        let store = Self::new(StorageContext::new(root));
        store.set_identity(identity);
        store
    }

    fn lock(&self) -> MutexGuard<'_, StorageContext> {
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches to the player's directory, or the shared one for `None` or a blank name.
    /// Records already loaded by callers are not carried over.
    pub fn set_identity(&self, identity: Option<&str>) -> bool {
        let mut context = self.lock();
        if let Err(e) = context.set_identity(identity) {
            error!(error = %e, "Refusing player directory, keeping the current one");
            return false;
        }
        let directory = context.directory();

        match fs::create_dir_all(&directory) {
            Ok(()) => {
                info!(
                    identity = context.identity().unwrap_or("<shared>"),
                    path = %directory.display(),
                    "Selected loot directory"
                );
                true
            }
            Err(e) => {
                error!(path = %directory.display(), error = %e, "Failed to create loot directory");
                false
            }
        }
    }

    pub fn identity(&self) -> Option<String> {
        self.lock().identity().map(str::to_string)
    }

    pub fn directory(&self) -> PathBuf {
        self.lock().directory()
    }

    pub fn list_known_entities(&self) -> BTreeSet<String> {
        find_entity_logs_in_dir(&self.lock().directory())
    }

    pub fn load(&self, entity: &str) -> Vec<KillRecord> {
        self.try_load(entity).unwrap_or_else(|e| {
            error!(entity, error = %e, "Failed to load loot records");
            Vec::new()
        })
    }

    pub fn try_load(&self, entity: &str) -> Result<Vec<KillRecord>, StoreError> {
        let context = self.lock();
        let path = context.entity_file(entity)?;
        Ok(read_records(&path)?.into_records())
    }

    /// Records of every known entity; no ordering between entities.
    pub fn load_all(&self) -> Vec<KillRecord> {
        let context = self.lock();
        let directory = context.directory();
        let mut records = Vec::new();

        for entity in find_entity_logs_in_dir(&directory) {
            let loaded = context
                .entity_file(&entity)
                .and_then(|path| read_records(&path));
            match loaded {
                Ok(log) => records.extend(log.into_records()),
                Err(e) => error!(entity = %entity, error = %e, "Failed to load loot records"),
            }
        }

        records
    }

    pub fn append(&self, record: &KillRecord) -> bool {
        match self.try_append(record) {
            Ok(()) => true,
            Err(e) => {
                error!(entity = %record.name, error = %e, "Failed to append loot record");
                false
            }
        }
    }

    pub fn try_append(&self, record: &KillRecord) -> Result<(), StoreError> {
        let context = self.lock();
        let path = context.entity_file(&record.name)?;
        append_record(&path, record)?;
        debug!(entity = %record.name, path = %path.display(), "Appended loot record");
        Ok(())
    }

    pub fn rewrite(&self, entity: &str, records: &[KillRecord]) -> bool {
        match self.try_rewrite(entity, records) {
            Ok(()) => true,
            Err(e) => {
                error!(entity, error = %e, "Failed to rewrite loot records");
                false
            }
        }
    }

    pub fn try_rewrite(&self, entity: &str, records: &[KillRecord]) -> Result<(), StoreError> {
        let context = self.lock();
        let path = context.entity_file(entity)?;
        write_records(&path, records)?;
        debug!(entity, count = records.len(), "Rewrote loot records");
        Ok(())
    }

    /// Removes the entity's whole log. Deleting a log that doesn't exist succeeds.
    pub fn delete(&self, entity: &str) -> bool {
        match self.try_delete(entity) {
            Ok(()) => true,
            Err(e) => {
                error!(entity, error = %e, "Failed to delete loot records");
                false
            }
        }
    }

    pub fn try_delete(&self, entity: &str) -> Result<(), StoreError> {
        let context = self.lock();
        let path = context.entity_file(entity)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(entity, path = %path.display(), "Deleted loot records");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(entity, "No loot records to delete");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Adds `drops` to the most recent record, e.g. a pet announced after the kill was logged.
    /// With no records on file a new event-style record is appended instead.
    pub fn amend_last(&self, entity: &str, drops: Vec<ItemEntry>) -> bool {
        match self.try_amend_last(entity, drops) {
            Ok(()) => true,
            Err(e) => {
                error!(entity, error = %e, "Failed to amend last loot record");
                false
            }
        }
    }

    pub fn try_amend_last(&self, entity: &str, drops: Vec<ItemEntry>) -> Result<(), StoreError> {
        if drops.is_empty() {
            return Ok(());
        }

        let context = self.lock();
        let path = context.entity_file(entity)?;
        let log = read_records(&path)?;
        let skipped = log.skipped;
        let mut records = log.into_records();

        match records.last_mut() {
            Some(last) => last.drops.extend(drops),
            None => {
                append_record(&path, &KillRecord::for_event(entity.trim(), UNKNOWN, drops))?;
                debug!(entity, "No record to amend, appended a new one");
                return Ok(());
            }
        }

        if skipped > 0 {
            warn!(entity, dropped = skipped, "Unreadable lines will be dropped by the amend rewrite");
        }
        write_records(&path, &records)?;
        debug!(entity, "Amended last loot record");
        Ok(())
    }

    pub fn needs_migration(&self, entity: &str) -> bool {
        let context = self.lock();
        let parsed = context
            .entity_file(entity)
            .and_then(|path| read_records(&path));
        match parsed {
            Ok(log) => log.records.iter().any(|p| p.format == RecordFormat::Legacy),
            Err(e) => {
                error!(entity, error = %e, "Failed to inspect loot records");
                false
            }
        }
    }

    /// Rewrites a log holding legacy lines in the current layout.
    pub fn migrate(&self, entity: &str) -> bool {
        match self.try_migrate(entity) {
            Ok(_) => true,
            Err(e) => {
                error!(entity, error = %e, "Failed to migrate loot records");
                false
            }
        }
    }

    /// Returns whether anything had to be converted.
    pub fn try_migrate(&self, entity: &str) -> Result<bool, StoreError> {
        let context = self.lock();
        let path = context.entity_file(entity)?;
        let log = read_records(&path)?;

        let legacy_count = log.records.iter().filter(|p| p.format == RecordFormat::Legacy).count();
        if legacy_count == 0 {
            return Ok(false);
        }

        if log.skipped > 0 {
            warn!(entity, dropped = log.skipped, "Unreadable lines will be dropped by the migration rewrite");
        }
        let records = log.into_records();
        write_records(&path, &records)?;
        info!(entity, converted = legacy_count, total = records.len(), "Migrated loot records to current format");
        Ok(true)
    }

    pub fn consolidate(records: &[KillRecord]) -> HashMap<i32, ItemEntry> {
        consolidate(records)
    }

    pub fn summary(&self, entity: &str) -> EntitySummary {
        EntitySummary::from_records(entity.trim().to_lowercase(), &self.load(entity))
    }
}

/// Decoded contents of one entity file.
#[derive(Debug, Default)]
struct StoredLog {
    records: Vec<ParsedRecord>,
    skipped: usize,
}

impl StoredLog {
    fn into_records(self) -> Vec<KillRecord> {
        self.records.into_iter().map(|p| p.record).collect()
    }
}

/// Each line decodes on its own; lines that aren't UTF-8 or don't parse are logged and skipped.
/// A missing file reads as empty.
fn read_records(path: &Path) -> Result<StoredLog, StoreError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoredLog::default()),
        Err(e) => return Err(e.into()),
    };

    let mut log = StoredLog::default();

    for (index, raw_line) in content.split(|&b| b == b'\n').enumerate() {
        let line = match std::str::from_utf8(raw_line) {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %path.display(), line = index + 1, error = %e, "Skipping loot record that isn't valid UTF-8");
                log.skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_record_line(line) {
            Ok(parsed) => log.records.push(parsed),
            Err(e) => {
                warn!(path = %path.display(), line = index + 1, error = %e, "Skipping malformed loot record");
                log.skipped += 1;
            }
        }
    }

    Ok(log)
}

fn append_record(path: &Path, record: &KillRecord) -> Result<(), StoreError> {
    let mut line = serialize_record(record)?;
    line.push('\n');

    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).read(true).append(true).open(path)?;

    // A crash can leave a partial last line; start on a fresh one so the new record stays readable
    if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            line.insert(0, '\n');
        }
    }

    file.write_all(line.as_bytes())?;
    file.flush()?;
    Ok(())
}

// Written beside the target and renamed over it, so readers see the old or the new file, never a partial one.
fn write_records(path: &Path, records: &[KillRecord]) -> Result<(), StoreError> {
    let mut content = String::new();
    for record in records {
        content.push_str(&serialize_record(record)?);
        content.push('\n');
    }

    ensure_parent(path)?;
    let temp_path = path.with_extension("log.tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}
