//! Storage backends for the record store.
//!
//! The record store never touches `std::fs` directly; it goes through [`Directory`], so the
//! backing can be swapped (in-memory for tests, a fault-injecting wrapper, another engine)
//! without changing store semantics.
//!
//! Vocabulary note:
//! - `flush()` pushes bytes to the OS. It is a visibility boundary, not a power-loss guarantee.
//! - `sync_all()` asks the OS to persist the file. Making a *rename* survive power loss also
//!   needs the parent directory synced.

use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// `sync_all` the file at `path`.
///
/// Requires a backend that exposes [`Directory::file_path`]; others get `NotSupported`.
pub fn sync_file<D: Directory + ?Sized>(dir: &D, path: &str) -> StoreResult<()> {
    let Some(p) = dir.file_path(path) else {
        return Err(StoreError::NotSupported(
            "sync_file requires Directory::file_path()".into(),
        ));
    };
    let f = std::fs::OpenOptions::new().read(true).open(&p)?;
    f.sync_all()?;
    Ok(())
}

/// `sync_all` the parent directory of `path`, making a create or rename durable.
pub fn sync_parent_dir<D: Directory + ?Sized>(dir: &D, path: &str) -> StoreResult<()> {
    let Some(p) = dir.file_path(path) else {
        return Err(StoreError::NotSupported(
            "sync_parent_dir requires Directory::file_path()".into(),
        ));
    };
    let Some(parent) = p.parent() else {
        return Err(StoreError::InvalidConfig(format!(
            "path has no parent directory: {p:?}"
        )));
    };
    // An empty parent means "relative to cwd".
    let parent = if parent.as_os_str().is_empty() {
        std::path::Path::new(".")
    } else {
        parent
    };
    std::fs::File::open(parent)?.sync_all()?;
    Ok(())
}

/// How far a store write goes before the operation reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// `flush()` after every append; rewrites use [`Directory::atomic_write`].
    #[default]
    Flush,
    /// Additionally `sync_all` appended files, and rewrite through
    /// [`DurableDirectory::atomic_write_durable`]. Filesystem backends only.
    Sync,
}

/// Directory-like storage backend.
///
/// Paths are `/`-separated and relative to the backend root.
pub trait Directory: Send + Sync {
    /// Create a file for writing, truncating it if it exists.
    fn create_file(&self, path: &str) -> StoreResult<Box<dyn Write>>;
    /// Open an existing file for reading.
    fn open_file(&self, path: &str) -> StoreResult<Box<dyn Read>>;
    /// Whether `path` exists.
    fn exists(&self, path: &str) -> bool;
    /// Remove a file. Removing a missing file is not an error.
    fn delete(&self, path: &str) -> StoreResult<()>;
    /// Atomically rename `from` to `to`, replacing `to`.
    fn atomic_rename(&self, from: &str, to: &str) -> StoreResult<()>;
    /// Open a file for appending, creating it if missing.
    fn append_file(&self, path: &str) -> StoreResult<Box<dyn Write>>;
    /// Replace the contents of `path` so readers see either the old or the new bytes.
    fn atomic_write(&self, path: &str, data: &[u8]) -> StoreResult<()>;
    /// Filesystem path, for backends that have one.
    fn file_path(&self, path: &str) -> Option<PathBuf>;
}

/// Stable-storage operations layered over any [`Directory`].
pub trait DurableDirectory: Directory {
    /// `sync_all` the file at `path`.
    fn sync_file(&self, path: &str) -> StoreResult<()> {
        sync_file(self, path)
    }

    /// `sync_all` the parent directory of `path`.
    fn sync_parent_dir(&self, path: &str) -> StoreResult<()> {
        sync_parent_dir(self, path)
    }

    /// Write temp, fsync temp, rename over `path`, fsync the parent directory.
    ///
    /// The temp file is removed if any step before the rename fails.
    fn atomic_write_durable(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        if self.file_path(path).is_none() {
            return Err(StoreError::NotSupported(
                "atomic_write_durable requires Directory::file_path()".into(),
            ));
        }

        let tmp = format!("{path}.tmp");
        let staged = (|| -> StoreResult<()> {
            let mut w = self.create_file(&tmp)?;
            w.write_all(data)?;
            w.flush()?;
            drop(w);
            self.sync_file(&tmp)?;
            self.atomic_rename(&tmp, path)
        })();
        if let Err(e) = staged {
            let _ = self.delete(&tmp);
            return Err(e);
        }

        self.sync_parent_dir(path)
    }
}

impl<T: Directory + ?Sized> DurableDirectory for T {}

/// Filesystem-backed [`Directory`] rooted at a local path.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    root: PathBuf,
}

impl FsDirectory {
    /// Open a filesystem backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.as_os_str().is_empty() {
            std::fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn ensure_parent(full_path: &std::path::Path) -> StoreResult<()> {
        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl Directory for FsDirectory {
    fn create_file(&self, path: &str) -> StoreResult<Box<dyn Write>> {
        let full_path = self.resolve_path(path);
        Self::ensure_parent(&full_path)?;
        Ok(Box::new(std::fs::File::create(full_path)?))
    }

    fn open_file(&self, path: &str) -> StoreResult<Box<dyn Read>> {
        let full_path = self.resolve_path(path);
        if !full_path.exists() {
            return Err(StoreError::MissingPath(full_path));
        }
        Ok(Box::new(std::fs::File::open(full_path)?))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path(path).exists()
    }

    fn delete(&self, path: &str) -> StoreResult<()> {
        let full_path = self.resolve_path(path);
        if full_path.is_file() {
            std::fs::remove_file(full_path)?;
        }
        Ok(())
    }

    fn atomic_rename(&self, from: &str, to: &str) -> StoreResult<()> {
        let to_path = self.resolve_path(to);
        Self::ensure_parent(&to_path)?;
        std::fs::rename(self.resolve_path(from), to_path)?;
        Ok(())
    }

    fn append_file(&self, path: &str) -> StoreResult<Box<dyn Write>> {
        let full_path = self.resolve_path(path);
        Self::ensure_parent(&full_path)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(full_path)?;
        Ok(Box::new(file))
    }

    fn atomic_write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        let full_path = self.resolve_path(path);
        let temp_path = self.resolve_path(&format!("{path}.tmp"));
        Self::ensure_parent(&temp_path)?;

        let mut temp_file = std::fs::File::create(&temp_path)?;
        if let Err(e) = temp_file.write_all(data).and_then(|()| temp_file.flush()) {
            drop(temp_file);
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        drop(temp_file);
        std::fs::rename(&temp_path, &full_path)?;
        Ok(())
    }

    fn file_path(&self, path: &str) -> Option<PathBuf> {
        Some(self.resolve_path(path))
    }
}

type FileMap = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// In-memory [`Directory`] used by tests, benches, and fuzzing.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    files: FileMap,
}

impl MemoryDirectory {
    /// Create an empty in-memory directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_files(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
        self.files.read().map_err(|_| poisoned())
    }

    fn write_files(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
        self.files.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> StoreError {
    StoreError::LockFailed {
        resource: "memory directory".to_string(),
        reason: "lock poisoned".to_string(),
    }
}

impl Directory for MemoryDirectory {
    fn create_file(&self, path: &str) -> StoreResult<Box<dyn Write>> {
        self.write_files()?.insert(path.to_string(), Vec::new());
        Ok(Box::new(MemoryAppender {
            files: self.files.clone(),
            path: path.to_string(),
        }))
    }

    fn open_file(&self, path: &str) -> StoreResult<Box<dyn Read>> {
        let data = self
            .read_files()?
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        Ok(Box::new(std::io::Cursor::new(data)))
    }

    fn exists(&self, path: &str) -> bool {
        self.files
            .read()
            .map(|f| f.contains_key(path))
            .unwrap_or(false)
    }

    fn delete(&self, path: &str) -> StoreResult<()> {
        self.write_files()?.remove(path);
        Ok(())
    }

    fn atomic_rename(&self, from: &str, to: &str) -> StoreResult<()> {
        let mut files = self.write_files()?;
        let data = files
            .remove(from)
            .ok_or_else(|| StoreError::NotFound(from.to_string()))?;
        files.insert(to.to_string(), data);
        Ok(())
    }

    fn append_file(&self, path: &str) -> StoreResult<Box<dyn Write>> {
        self.write_files()?.entry(path.to_string()).or_default();
        Ok(Box::new(MemoryAppender {
            files: self.files.clone(),
            path: path.to_string(),
        }))
    }

    fn atomic_write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        self.write_files()?.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn file_path(&self, _path: &str) -> Option<PathBuf> {
        None
    }
}

/// Writes land directly in the shared map, so they are visible without `flush()`.
struct MemoryAppender {
    files: FileMap,
    path: String,
}

impl Write for MemoryAppender {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut files = self
            .files
            .write()
            .map_err(|_| std::io::Error::other("lock poisoned"))?;
        files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
