//! Persisted client preferences.

use crate::config::{Scope, SELECT_PREFERENCE_KEY};
use crate::error::{Result, RotateError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// String key/value storage scoped to one client.
pub trait PreferenceStore {
    /// Read a value, `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read the persisted scope, falling back to [`Scope::All`].
pub fn load_scope<P: PreferenceStore + ?Sized>(prefs: &P) -> Result<Scope> {
    let Some(raw) = prefs.get(SELECT_PREFERENCE_KEY)? else {
        return Ok(Scope::default());
    };
    Ok(Scope::from_preference_str(&raw).unwrap_or_else(|| {
        warn!("Unknown scope preference '{}', using '{}'", raw, Scope::All);
        Scope::All
    }))
}

/// Persist the scope under the `select` key.
pub fn store_scope<P: PreferenceStore + ?Sized>(prefs: &mut P, scope: Scope) -> Result<()> {
    prefs.set(SELECT_PREFERENCE_KEY, scope.as_str())
}

/// In-process preference map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a JSON object file.
///
/// A missing file reads as empty; the file is created on the first write.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| RotateError::Preferences {
            message: format!("{}: {}", self.path.display(), e),
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        debug!("Stored preference {}={} in {}", key, value, self.path.display());
        Ok(())
    }
}
