use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Entity log file names, e.g. "zulrah.log"
    pub static ref RE_LOG_FILE: Regex = Regex::new(r"^(?P<entity>.+)\.log$").unwrap();

    // Characters that can't appear in a file name on any platform we write to
    pub static ref RE_UNSAFE_FILE_CHARS: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap();
}
