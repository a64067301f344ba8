use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use crate::error::StoreError;
use crate::models::StoreSettings;

const SETTINGS_FILE: &str = "settings.json";

pub fn get_settings_file_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE)
}

pub fn load_store_settings(file_path: &Path) -> StoreSettings {
    if !file_path.exists() {
        info!(path = %file_path.display(), "No existing settings found, using defaults");
        return StoreSettings::default();
    }

    match fs::read_to_string(file_path) {
        Ok(content) => match serde_json::from_str::<StoreSettings>(&content) {
            Ok(settings) => {
                info!(
                    storage_root = %settings.storage_root.display(),
                    player = settings.player.as_deref().unwrap_or("<shared>"),
                    "Loaded settings"
                );
                settings
            }
            Err(e) => {
                warn!(error = %e, "Error parsing settings JSON, using defaults");
                StoreSettings::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "Error reading settings file, using defaults");
            StoreSettings::default()
        }
    }
}

pub fn save_store_settings(settings: &StoreSettings, file_path: &Path) -> Result<(), StoreError> {
    let json_content = serde_json::to_string_pretty(settings)
        .map_err(|e| StoreError::Settings(format!("JSON serialization error: {}", e)))?;

    let mut file = fs::File::create(file_path)?;
    file.write_all(json_content.as_bytes())?;
    file.flush()?;

    info!(path = %file_path.display(), "Saved settings");
    Ok(())
}

pub fn auto_save_store_settings(settings: &StoreSettings, file_path: &Path) {
    if let Err(e) = save_store_settings(settings, file_path) {
        error!(error = %e, "Failed to auto-save settings");
    }
}
