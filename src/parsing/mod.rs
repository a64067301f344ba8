pub mod regex;
pub mod record_parser;

pub use record_parser::{ParsedRecord, RecordFormat, parse_record_line, serialize_record};
