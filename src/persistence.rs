//! JSON persistence helpers for the tracker's data directory.
//!
//! Pins and planner configuration are small JSON files under the data
//! directory (`~/.ca-tracker/` by default). Missing or unreadable files load
//! as defaults so a corrupt file never blocks startup.

use crate::catalog::AchievementId;
use crate::constants::DATA_DIR_NAME;
use crate::error::PersistenceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default data directory (`~/.ca-tracker`).
pub fn default_data_dir() -> Result<PathBuf, PersistenceError> {
    let home_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

/// A directory holding the tracker's JSON files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for a file in the data directory.
    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Create the directory if it does not exist yet.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Load a JSON file, returning `T::default()` if missing or invalid.
    pub fn load_json_or_default<T: Default + DeserializeOwned>(&self, filename: &str) -> T {
        let path = self.path(filename);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(_) => return T::default(),
        };
        match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable save file");
                T::default()
            }
        }
    }

    /// Save a value as pretty-printed JSON.
    pub fn save_json<T: Serialize>(&self, filename: &str, data: &T) -> Result<(), PersistenceError> {
        self.ensure()?;
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(filename), json)?;
        Ok(())
    }

    /// Delete a file. A file that is already gone is not an error.
    pub fn remove(&self, filename: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path(filename)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl LenientId {
    fn into_id(self) -> Option<AchievementId> {
        match self {
            LenientId::Number(n) => AchievementId::try_from(n).ok(),
            LenientId::Text(s) => s.trim().parse().ok(),
            LenientId::Other(_) => None,
        }
    }
}

/// Decode a list of ids that may have been stored as numbers or as
/// numeric strings, preserving order and dropping duplicates and garbage.
pub fn decode_id_list(values: Vec<serde_json::Value>) -> Vec<AchievementId> {
    let mut seen = BTreeSet::new();
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<LenientId>(v).ok())
        .filter_map(LenientId::into_id)
        .filter(|id| *id > 0 && seen.insert(*id))
        .collect()
}

/// Serde adapter for [`decode_id_list`] into a set.
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<BTreeSet<AchievementId>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(decode_id_list(values).into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_path_format() {
        let dir = DataDir::new("/tmp/ca-tracker-test");
        let path = dir.path("pinned.json");
        assert!(path.to_string_lossy().ends_with("ca-tracker-test/pinned.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path());
        let val: Vec<String> = dir.load_json_or_default("nonexistent.json");
        assert!(val.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path().join("nested"));
        let data = vec![3u32, 1, 2];
        dir.save_json("ids.json", &data).expect("save should succeed");

        let loaded: Vec<u32> = dir.load_json_or_default("ids.json");
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path());
        fs::write(dir.path("broken.json"), "{not json").unwrap();
        let loaded: Vec<u32> = dir.load_json_or_default("broken.json");
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path());
        assert!(dir.remove("never-written.json").is_ok());
    }

    #[test]
    fn test_decode_id_list_mixed_encodings() {
        let values = vec![json!(5), json!("12"), json!("x"), json!(5), json!(-1), json!(null)];
        assert_eq!(decode_id_list(values), vec![5, 12]);
    }
}
