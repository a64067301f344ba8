use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::paths::default_storage_root;

pub const ROOT_ENV_VAR: &str = "LOOT_LOGGER_ROOT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding the shared log files and one subdirectory per player
    pub storage_root: PathBuf,
    /// Player selected at startup, shared directory when unset
    pub player: Option<String>,
    /// Filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            player: None,
            log_level: "info".to_string(),
        }
    }
}

impl StoreSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
            self.set_storage_root(root);
        }
    }

    /// Ignores blank paths so a stray empty variable can't point the store at the working directory.
    pub fn set_storage_root(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        if !root.as_os_str().is_empty() {
            self.storage_root = root;
        }
    }

    pub fn set_player(&mut self, player: Option<String>) {
        self.player = player
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: StoreSettings = serde_json::from_str(r#"{"player":"Zezima"}"#).unwrap();
        assert_eq!(settings.player.as_deref(), Some("Zezima"));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.storage_root, default_storage_root());
    }

    #[test]
    fn blank_player_clears_selection() {
        let mut settings = StoreSettings::new();
        settings.set_player(Some("  Lynx Titan ".to_string()));
        assert_eq!(settings.player.as_deref(), Some("Lynx Titan"));

        settings.set_player(Some("   ".to_string()));
        assert_eq!(settings.player, None);
    }

    #[test]
    fn blank_root_is_ignored() {
        let mut settings = StoreSettings::new();
        settings.set_storage_root("/tmp/loot");
        settings.set_storage_root("");
        assert_eq!(settings.storage_root, PathBuf::from("/tmp/loot"));
    }
}
