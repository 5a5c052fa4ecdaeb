//! Store configuration.

use crate::auth::AdminCredentials;
use crate::error::{StoreError, StoreResult};
use crate::formats::DEFAULT_DATA_FILE;
use crate::storage::WritePolicy;
use std::path::{Path, PathBuf};

/// Everything needed to open a filesystem-backed store and gate its admin operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the complaint file. Relative paths resolve against the working directory.
    pub data_path: PathBuf,
    /// Whether writes stop at `flush()` or also `sync_all`.
    pub write_policy: WritePolicy,
    /// Credentials for the admin panel.
    pub admin: AdminCredentials,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            write_policy: WritePolicy::default(),
            admin: AdminCredentials::default(),
        }
    }
}

impl StoreConfig {
    /// Default configuration pointed at `data_path`.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Replace the write policy.
    pub fn with_write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }

    /// Replace the admin credentials.
    pub fn with_admin(mut self, admin: AdminCredentials) -> Self {
        self.admin = admin;
        self
    }

    /// Reject paths that cannot name a file.
    pub fn validate(&self) -> StoreResult<()> {
        self.split_data_path().map(|_| ())
    }

    /// `(directory, file name)` for the data path.
    pub(crate) fn split_data_path(&self) -> StoreResult<(PathBuf, String)> {
        let file_name = self
            .data_path
            .file_name()
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!(
                    "data path does not name a file: {:?}",
                    self.data_path
                ))
            })?
            .to_str()
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!(
                    "data file name is not valid UTF-8: {:?}",
                    self.data_path
                ))
            })?
            .to_string();
        let root = match self.data_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        Ok((root, file_name))
    }
}
