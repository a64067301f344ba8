use std::path::PathBuf;

const STORAGE_DIR_NAME: &str = ".loot-logger";

pub fn home_dir() -> PathBuf {
    if cfg!(windows) {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| {
            std::env::var("USERNAME")
                .map(|username| format!("C:\\Users\\{}", username))
                .unwrap_or_else(|_| "C:\\Users\\Default".to_string())
        });
        PathBuf::from(home)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| {
            std::env::var("USER")
                .map(|user| format!("/home/{}", user))
                .unwrap_or_else(|_| "/home/default".to_string())
        });
        PathBuf::from(home)
    }
}

pub fn default_storage_root() -> PathBuf {
    let mut path = home_dir();
    path.push(STORAGE_DIR_NAME);
    path
}
