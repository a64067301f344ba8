use std::path::{Path, PathBuf};
use crate::error::StoreError;
use crate::parsing::regex::RE_UNSAFE_FILE_CHARS;

pub const LOG_EXTENSION: &str = "log";

/// Where log files live: the storage root, narrowed to a player directory once an identity is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageContext {
    root: PathBuf,
    identity: Option<String>,
}

impl StorageContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            identity: None,
        }
    }

    pub fn with_identity(root: impl Into<PathBuf>, identity: Option<&str>) -> Result<Self, StoreError> {
        let mut context = Self::new(root);
        context.set_identity(identity)?;
        Ok(context)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Blank names select the shared directory. Names that would resolve to the root or
    /// its parent are refused and the current identity is kept.
    pub fn set_identity(&mut self, identity: Option<&str>) -> Result<(), StoreError> {
        let identity = identity.map(str::trim).filter(|name| !name.is_empty());
        if let Some(name) = identity {
            if is_dot_component(&sanitize_component(name)) {
                return Err(StoreError::InvalidIdentity(name.to_string()));
            }
        }
        self.identity = identity.map(str::to_string);
        Ok(())
    }

    pub fn directory(&self) -> PathBuf {
        match &self.identity {
            Some(name) => self.root.join(sanitize_component(name)),
            None => self.root.clone(),
        }
    }

    pub fn entity_file(&self, entity: &str) -> Result<PathBuf, StoreError> {
        let key = entity_key(entity)?;
        Ok(self.directory().join(format!("{}.{}", key, LOG_EXTENSION)))
    }
}

fn sanitize_component(name: &str) -> String {
    RE_UNSAFE_FILE_CHARS.replace_all(name, "_").into_owned()
}

fn is_dot_component(component: &str) -> bool {
    component.chars().all(|c| c == '.')
}

/// Lookup key for an entity: trimmed, lowercased and safe to use as a file stem.
pub fn entity_key(entity: &str) -> Result<String, StoreError> {
    let key = sanitize_component(&entity.trim().to_lowercase());
    if key.is_empty() || is_dot_component(&key) {
        return Err(StoreError::InvalidEntityName(entity.to_string()));
    }
    Ok(key)
}
