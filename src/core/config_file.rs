//! Persistent preference storage
//!
//! Manages extension defaults in ~/.config/reference-viewer/defaults.json.
//! The file is a single JSON object mapping preference keys to values, so
//! several extensions can share one store without knowing about each other.

use crate::error::{OverlayError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key holding the ordered list of overlay mappings
pub const SETTINGS_KEY: &str = "com.black-foundry.settingsReferenceViewer";

/// Key holding the last font chosen in the settings panel
pub const DEFAULT_FONT_KEY: &str = "com.black-foundry.settingsReferenceViewerFont";

/// Font offered by the settings panel when nothing was chosen before
pub const FALLBACK_FONT: &str = "HiraginoSans";

const APP_DIR: &str = "reference-viewer";
const DEFAULTS_FILE: &str = "defaults.json";

/// Host-provided key/value storage that survives across sessions
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Get the path to the reference viewer config directory
pub fn config_dir() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
    config_dir.join(APP_DIR)
}

/// Get the path to the default preference file
pub fn defaults_path() -> PathBuf {
    config_dir().join(DEFAULTS_FILE)
}

/// Read the last chosen font, falling back to [`FALLBACK_FONT`]
pub fn default_font(store: &dyn PreferenceStore) -> String {
    store
        .get(DEFAULT_FONT_KEY)
        .and_then(|value| value.as_str().map(str::to_owned))
        .filter(|font| !font.is_empty())
        .unwrap_or_else(|| FALLBACK_FONT.to_string())
}

/// Preferences backed by a JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(defaults_path())
    }

    /// Open the store at `path`
    ///
    /// A missing or empty file yields an empty store; the file is created
    /// on the first write. Anything but a JSON object is refused so that a
    /// later write never replaces data the store could not read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("Preference file {:?} does not exist yet", path);
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| OverlayError::Io {
            path: path.clone(),
            source,
        })?;
        let values = if contents.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(&contents)? {
                Value::Object(values) => values,
                other => {
                    return Err(OverlayError::NotAnObject {
                        path,
                        found: kind_of(&other),
                    })
                }
            }
        };

        debug!("Loaded {} preference keys from {:?}", values.len(), path);
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| OverlayError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents).map_err(|source| OverlayError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// Preferences kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Initialize the user configuration directory
///
/// This creates the ~/.config/reference-viewer directory and an empty
/// defaults.json when none exists yet.
pub fn initialize_config_directory() -> anyhow::Result<()> {
    let config_dir = config_dir();
    fs::create_dir_all(&config_dir)?;
    println!("Created config directory: {:?}", config_dir);

    let defaults_path = config_dir.join(DEFAULTS_FILE);
    if !defaults_path.exists() {
        fs::write(&defaults_path, "{}")?;
        println!("Created defaults file: {:?}", defaults_path);
    } else {
        println!("Defaults file already exists: {:?}", defaults_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join(DEFAULTS_FILE)).expect("open");
        assert_eq!(store.get(SETTINGS_KEY), None);
    }

    #[test]
    fn test_set_writes_and_reopen_reads() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(DEFAULTS_FILE);

        let mut store = JsonFileStore::open(&path).expect("open");
        store.set(DEFAULT_FONT_KEY, json!("Menlo")).expect("set");
        store.set(SETTINGS_KEY, json!([{"fontFamily": "Arial"}])).expect("set");
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get(DEFAULT_FONT_KEY), Some(json!("Menlo")));
        assert_eq!(
            reopened.get(SETTINGS_KEY),
            Some(json!([{"fontFamily": "Arial"}]))
        );
    }

    #[test]
    fn test_empty_file_opens_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULTS_FILE);
        fs::write(&path, "  \n").expect("write");
        let store = JsonFileStore::open(&path).expect("open");
        assert_eq!(store.get(DEFAULT_FONT_KEY), None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULTS_FILE);
        fs::write(&path, "{not json").expect("write");
        assert!(matches!(JsonFileStore::open(&path), Err(OverlayError::Json(_))));
    }

    #[test]
    fn test_non_object_file_is_refused_and_kept() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULTS_FILE);
        fs::write(&path, "[1, 2, 3]").expect("write");

        match JsonFileStore::open(&path) {
            Err(OverlayError::NotAnObject { found, .. }) => assert_eq!(found, "an array"),
            other => panic!("expected NotAnObject, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).expect("read"), "[1, 2, 3]");
    }

    #[test]
    fn test_default_font_fallback() {
        let mut store = MemoryStore::default();
        assert_eq!(default_font(&store), FALLBACK_FONT);
        store.set(DEFAULT_FONT_KEY, json!("Menlo-Bold")).expect("set");
        assert_eq!(default_font(&store), "Menlo-Bold");
        store.set(DEFAULT_FONT_KEY, json!(42)).expect("set");
        assert_eq!(default_font(&store), FALLBACK_FONT);
    }
}
