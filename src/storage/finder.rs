use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use crate::parsing::regex::RE_LOG_FILE;
use crate::storage::context::entity_key;

/// Entity keys for every `.log` file directly inside `dir`. Missing or unreadable directories count as empty.
/// Files whose stem isn't already a key (e.g. a hand-placed `Zulrah.log`) can't be loaded, so they are left out.
pub fn find_entity_logs_in_dir(dir: &Path) -> BTreeSet<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return BTreeSet::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let file_name = file_name.to_str()?;
            let stem = RE_LOG_FILE.captures(file_name)?["entity"].to_string();
            match entity_key(&stem) {
                Ok(key) if key == stem => Some(stem),
                _ => {
                    debug!(file = file_name, "Ignoring log file that doesn't map to an entity");
                    None
                }
            }
        })
        .collect()
}
