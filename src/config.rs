//! Runtime settings.
//!
//! Resolved in three layers: built-in defaults, then environment variables,
//! then command-line overrides applied by the binary.
//!
//! - `CA_TRACKER_DATA_DIR` -- directory for pins, planner state and the log
//! - `CA_TRACKER_CATALOG` -- path of the combat achievements JSON
//! - `CA_TRACKER_API_URL` -- base URL of the player lookup endpoint
//! - `CA_TRACKER_ACCOUNT_TYPE` -- account type path segment (`STANDARD`)

use crate::constants::{
    CATALOG_FILE, DEFAULT_ACCOUNT_TYPE, DEFAULT_API_BASE_URL, ENV_ACCOUNT_TYPE, ENV_API_URL,
    ENV_CATALOG, ENV_DATA_DIR,
};
use crate::error::PersistenceError;
use crate::lookup::WikiSyncClient;
use crate::persistence::{default_data_dir, DataDir};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub api_base_url: String,
    pub account_type: String,
}

impl Settings {
    /// Defaults under `data_dir`, ignoring the environment.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            catalog_path: data_dir.join(CATALOG_FILE),
            data_dir,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
        }
    }

    /// Defaults overridden by the environment.
    pub fn from_env() -> Result<Self, PersistenceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an explicit variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, PersistenceError> {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let data_dir = match non_empty(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let mut settings = Self::with_data_dir(data_dir);

        if let Some(path) = non_empty(ENV_CATALOG) {
            settings.catalog_path = PathBuf::from(path);
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            settings.api_base_url = url;
        }
        if let Some(account_type) = non_empty(ENV_ACCOUNT_TYPE) {
            settings.account_type = account_type;
        }
        Ok(settings)
    }

    /// Point at a different data directory. The catalog follows unless it
    /// was set explicitly.
    pub fn override_data_dir(&mut self, data_dir: PathBuf) {
        if self.catalog_path == self.data_dir.join(CATALOG_FILE) {
            self.catalog_path = data_dir.join(CATALOG_FILE);
        }
        self.data_dir = data_dir;
    }

    pub fn data(&self) -> DataDir {
        DataDir::new(&self.data_dir)
    }

    pub fn lookup_client(&self) -> WikiSyncClient {
        WikiSyncClient::new(&self.api_base_url, &self.account_type)
    }
}
