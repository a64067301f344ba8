pub mod paths;
pub mod settings_persistence;

pub use paths::default_storage_root;
pub use settings_persistence::{load_store_settings, save_store_settings, auto_save_store_settings, get_settings_file_path};
