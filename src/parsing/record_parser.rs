use serde::Deserialize;
use crate::models::{KillRecord, LegacyKillRecord};

/// Schema a stored line was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Current,
    Legacy,
}

// Current layout is tried first; untagged falls through to the legacy one on shape mismatch.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLine {
    Current(KillRecord),
    Legacy(LegacyKillRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub record: KillRecord,
    pub format: RecordFormat,
}

pub fn parse_record_line(line: &str) -> Result<ParsedRecord, serde_json::Error> {
    let parsed = match serde_json::from_str::<StoredLine>(line.trim())? {
        StoredLine::Current(record) => ParsedRecord { record, format: RecordFormat::Current },
        StoredLine::Legacy(legacy) => ParsedRecord { record: legacy.into(), format: RecordFormat::Legacy },
    };
    Ok(parsed)
}

/// One record as a single JSON line, without the trailing newline.
pub fn serialize_record(record: &KillRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}
