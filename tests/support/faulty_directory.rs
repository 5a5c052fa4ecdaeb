//! Filesystem-backed `Directory` wrapper with targeted fault injection.
//!
//! Lives under `tests/support/` so it is not compiled as a standalone integration test target.

use complaint_store::storage::{Directory, FsDirectory};
use complaint_store::StoreResult;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Failpoints and counters.
#[derive(Default)]
pub struct FaultConfig {
    /// Fail when opening an append handle (permission denied, file locked elsewhere).
    pub fail_append_file: bool,
    /// Fail whole-file replacement.
    pub fail_atomic_write: bool,
    /// Fail opening the file for reading.
    pub fail_open_file: bool,
    /// Append handles handed out.
    pub append_calls: usize,
    /// Whole-file replacements attempted.
    pub atomic_write_calls: usize,
}

pub struct FaultyDirectory {
    inner: FsDirectory,
    cfg: Arc<Mutex<FaultConfig>>,
}

impl FaultyDirectory {
    pub fn new(inner: FsDirectory) -> Self {
        Self {
            inner,
            cfg: Arc::new(Mutex::new(FaultConfig::default())),
        }
    }

    /// Shared handle for toggling failpoints and reading counters.
    pub fn cfg(&self) -> Arc<Mutex<FaultConfig>> {
        self.cfg.clone()
    }

    fn injected(what: &str) -> complaint_store::StoreError {
        io::Error::new(io::ErrorKind::PermissionDenied, format!("injected {what} failure")).into()
    }
}

impl Directory for FaultyDirectory {
    fn create_file(&self, path: &str) -> StoreResult<Box<dyn io::Write>> {
        self.inner.create_file(path)
    }

    fn open_file(&self, path: &str) -> StoreResult<Box<dyn io::Read>> {
        if self.cfg.lock().unwrap().fail_open_file {
            return Err(Self::injected("open"));
        }
        self.inner.open_file(path)
    }

    fn exists(&self, path: &str) -> bool {
        self.inner.exists(path)
    }

    fn delete(&self, path: &str) -> StoreResult<()> {
        self.inner.delete(path)
    }

    fn atomic_rename(&self, from: &str, to: &str) -> StoreResult<()> {
        self.inner.atomic_rename(from, to)
    }

    fn append_file(&self, path: &str) -> StoreResult<Box<dyn io::Write>> {
        let mut cfg = self.cfg.lock().unwrap();
        cfg.append_calls += 1;
        if cfg.fail_append_file {
            return Err(Self::injected("append"));
        }
        drop(cfg);
        self.inner.append_file(path)
    }

    fn atomic_write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        let mut cfg = self.cfg.lock().unwrap();
        cfg.atomic_write_calls += 1;
        if cfg.fail_atomic_write {
            return Err(Self::injected("atomic write"));
        }
        drop(cfg);
        self.inner.atomic_write(path, data)
    }

    fn file_path(&self, path: &str) -> Option<PathBuf> {
        self.inner.file_path(path)
    }
}
