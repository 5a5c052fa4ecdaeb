//! The complaint record store.
//!
//! One flat file, one record per line (see [`crate::formats`]). Nothing is cached: every
//! operation re-reads the whole file, so a caller always sees what is on disk.
//!
//! ## Two surfaces
//!
//! - `read_all` / `create` / `update_status` / `delete` are the collaborator contract. They
//!   never return errors: failures are logged and resolved to an empty sequence or `false`.
//! - `try_*` twins return [`StoreResult`] for callers that want the cause.
//!
//! ## Concurrency
//!
//! Single process, synchronous. `update_status` and `delete` rewrite the whole file without a
//! lock, so a second process appending at the same moment can lose its write. Rewrites go
//! through `atomic_write`, so a crash mid-rewrite leaves the old or the new file, never a torn
//! one.
//!
//! ## Bytes on disk
//!
//! Mutations work on raw bytes split into lines with their terminators. Lines an operation
//! does not target go back exactly as read, including their terminator and any bytes that are
//! not UTF-8 (older files written as cp1252, for instance). Lossy decoding happens only on the
//! read-only paths.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::formats::{self, RawLine};
use crate::record::{self, Complaint, ComplaintId, Status};
use crate::storage::{self, Directory, DurableDirectory, FsDirectory, WritePolicy};
use chrono::NaiveDate;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Source of the date stamped on new complaints.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Today's date in the local timezone.
pub fn system_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Tunables for a [`RecordStore`].
#[derive(Clone)]
pub struct StoreOptions {
    /// How far writes go before an operation reports success.
    pub write_policy: WritePolicy,
    /// Date source for `create`.
    pub clock: Clock,
}

impl StoreOptions {
    /// Replace the clock, e.g. with a fixed date in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the write policy.
    pub fn with_write_policy(mut self, write_policy: WritePolicy) -> Self {
        self.write_policy = write_policy;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            write_policy: WritePolicy::default(),
            clock: Arc::new(system_today),
        }
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("write_policy", &self.write_policy)
            .finish_non_exhaustive()
    }
}

/// Line-oriented complaint store over a [`Directory`].
pub struct RecordStore {
    dir: Arc<dyn Directory>,
    path: String,
    options: StoreOptions,
}

impl RecordStore {
    /// Store at `path` inside `dir`, flushing after every write.
    pub fn new(dir: impl Into<Arc<dyn Directory>>, path: impl Into<String>) -> Self {
        Self::with_options(dir, path, StoreOptions::default())
    }

    /// Store that `sync_all`s appends and rewrites durably. Needs a filesystem backend.
    pub fn new_durable(dir: impl Into<Arc<dyn Directory>>, path: impl Into<String>) -> Self {
        Self::with_options(
            dir,
            path,
            StoreOptions::default().with_write_policy(WritePolicy::Sync),
        )
    }

    /// Store with explicit options.
    pub fn with_options(
        dir: impl Into<Arc<dyn Directory>>,
        path: impl Into<String>,
        options: StoreOptions,
    ) -> Self {
        Self {
            dir: dir.into(),
            path: path.into(),
            options,
        }
    }

    /// Filesystem-backed store described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let (root, file_name) = config.split_data_path()?;
        let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(root)?);
        Ok(Self::with_options(
            dir,
            file_name,
            StoreOptions::default().with_write_policy(config.write_policy),
        ))
    }

    /// Path of the complaint file within the directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Every stored line in file order, unparsed. Missing file or read failure: empty.
    pub fn read_all(&self) -> Vec<String> {
        self.try_read_all().unwrap_or_else(|e| {
            warn!(path = %self.path, error = %e, "read_all failed");
            Vec::new()
        })
    }

    /// Append a new `Pending` complaint. `false` if it could not be saved.
    ///
    /// Callers validate that `name` and `roll_no` are non-empty; the store accepts anything.
    pub fn create(&self, name: &str, roll_no: &str, issue: &str) -> bool {
        match self.try_create(name, roll_no, issue) {
            Ok(_) => true,
            Err(e) => {
                warn!(path = %self.path, error = %e, "create failed");
                false
            }
        }
    }

    /// Set the status of complaint `id`. `false` if no such id, or the rewrite failed.
    pub fn update_status(&self, id: ComplaintId, status: Status) -> bool {
        self.try_update_status(id, status).unwrap_or_else(|e| {
            warn!(path = %self.path, %id, error = %e, "update_status failed");
            false
        })
    }

    /// Remove complaint `id`. `false` if no such id, or the rewrite failed.
    pub fn delete(&self, id: ComplaintId) -> bool {
        self.try_delete(id).unwrap_or_else(|e| {
            warn!(path = %self.path, %id, error = %e, "delete failed");
            false
        })
    }

    /// Fallible [`read_all`](Self::read_all).
    pub fn try_read_all(&self) -> StoreResult<Vec<String>> {
        let bytes = self.read_bytes()?;
        Ok(formats::raw_lines(&bytes)
            .iter()
            .map(|line| line.text().into_owned())
            .collect())
    }

    /// Every well-formed complaint in file order. Corrupt lines are skipped.
    pub fn try_list(&self) -> StoreResult<Vec<Complaint>> {
        let bytes = self.read_bytes()?;
        let mut out = Vec::new();
        for (n, raw) in formats::raw_lines(&bytes).iter().enumerate() {
            let line = raw.text();
            if line.trim().is_empty() {
                continue;
            }
            match Complaint::parse_line(&line) {
                Ok(c) => out.push(c),
                Err(e) => debug!(path = %self.path, line_no = n + 1, error = %e, "skipping corrupt line"),
            }
        }
        Ok(out)
    }

    /// Fallible [`create`](Self::create). Returns the stored complaint.
    pub fn try_create(&self, name: &str, roll_no: &str, issue: &str) -> StoreResult<Complaint> {
        // Fail before appending rather than after a write that cannot be synced.
        if self.options.write_policy == WritePolicy::Sync && self.dir.file_path(&self.path).is_none()
        {
            return Err(StoreError::NotSupported(
                "WritePolicy::Sync requires Directory::file_path()".into(),
            ));
        }
        let bytes = self.read_bytes()?;
        let lines = formats::raw_lines(&bytes);
        let id = match lines.iter().rev().find_map(|l| record::line_id(&l.text())) {
            None => ComplaintId::FIRST,
            Some(last) => last
                .next()
                .ok_or_else(|| StoreError::InvalidId(format!("no id left after {last}")))?,
        };
        let complaint = Complaint::new(id, name, roll_no, (self.options.clock)(), issue);

        // Match the file's existing line ending.
        let ending = lines
            .iter()
            .rev()
            .map(|l| l.ending)
            .find(|e| !e.is_empty())
            .unwrap_or(&b"\n"[..]);
        let mut buf = Vec::new();
        // Terminate a last line that was written without its newline.
        if lines.last().is_some_and(|l| l.ending.is_empty()) {
            buf.extend_from_slice(ending);
        }
        buf.extend_from_slice(complaint.to_line().as_bytes());
        buf.extend_from_slice(ending);

        let mut w = self.dir.append_file(&self.path)?;
        w.write_all(&buf)?;
        w.flush()?;
        drop(w);
        if self.options.write_policy == WritePolicy::Sync {
            storage::sync_file(&*self.dir, &self.path)?;
        }

        info!(path = %self.path, id = %complaint.id, "complaint submitted");
        Ok(complaint)
    }

    /// Fallible [`update_status`](Self::update_status).
    pub fn try_update_status(&self, id: ComplaintId, status: Status) -> StoreResult<bool> {
        let bytes = self.read_bytes()?;
        let mut data = Vec::with_capacity(bytes.len() + status.as_str().len());
        let mut found = false;
        for line in formats::raw_lines(&bytes) {
            let updated = if record::line_has_id(&line.text(), id) {
                record::with_status(line.content, status)
            } else {
                None
            };
            match updated {
                Some(content) => {
                    data.extend_from_slice(&content);
                    data.extend_from_slice(line.ending);
                    found = true;
                }
                None => push_line(&mut data, &line),
            }
        }
        if !found {
            debug!(path = %self.path, %id, "update_status: id not found");
            return Ok(false);
        }
        self.rewrite(&data)?;
        info!(path = %self.path, %id, %status, "status updated");
        Ok(true)
    }

    /// Fallible [`delete`](Self::delete).
    pub fn try_delete(&self, id: ComplaintId) -> StoreResult<bool> {
        let bytes = self.read_bytes()?;
        let mut data = Vec::with_capacity(bytes.len());
        let mut removed = 0usize;
        for line in formats::raw_lines(&bytes) {
            if record::line_has_id(&line.text(), id) {
                removed += 1;
            } else {
                push_line(&mut data, &line);
            }
        }
        if removed == 0 {
            debug!(path = %self.path, %id, "delete: id not found");
            return Ok(false);
        }
        self.rewrite(&data)?;
        info!(path = %self.path, %id, removed, "complaint deleted");
        Ok(true)
    }

    /// The whole file; empty if it does not exist.
    fn read_bytes(&self) -> StoreResult<Vec<u8>> {
        let mut bytes = Vec::new();
        if self.dir.exists(&self.path) {
            self.dir.open_file(&self.path)?.read_to_end(&mut bytes)?;
        }
        Ok(bytes)
    }

    fn rewrite(&self, data: &[u8]) -> StoreResult<()> {
        debug!(path = %self.path, bytes = data.len(), "rewriting store");
        match self.options.write_policy {
            WritePolicy::Flush => self.dir.atomic_write(&self.path, data),
            WritePolicy::Sync => self.dir.atomic_write_durable(&self.path, data),
        }
    }
}

fn push_line(data: &mut Vec<u8>, line: &RawLine<'_>) {
    data.extend_from_slice(line.content);
    data.extend_from_slice(line.ending);
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
