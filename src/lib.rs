//! `complaint_store`: a line-oriented record store for student complaints.
//!
//! Scope:
//! - record format and codec (`formats`, `record`)
//! - storage backend abstraction (`storage`)
//! - the record store itself: append, scan, update-by-id, delete-by-id (`store`)
//! - read-side views for the admin table and student lookup (`query`)
//! - the fixed admin credential check (`auth`) and configuration (`config`)
//!
//! Non-goal: any presentation. The `complaintdesk` binary is a thin driver over this crate.
//!
//! ## Contract (what you can rely on)
//!
//! - **Ids** are assigned as the last well-formed record's id + 1. Deleting an older record
//!   never frees its id; deleting the newest one does, since the file keeps no high-water mark.
//! - **Every line the store writes has exactly six fields.** Free text is sanitized on the way
//!   in; the delimiter and line breaks cannot reach the file.
//! - **Corrupt lines never block the rest of the store.** They are skipped by structured reads,
//!   never match an id, and are carried through rewrites unchanged.
//! - **Rewrites are byte-exact** for every line they do not target, including line endings and
//!   bytes that are not UTF-8.
//! - **No caching.** Every call re-reads the file.
//! - **Single process.** Concurrent writers in different processes can lose updates; see
//!   [`store`] for details.
//!
//! ```no_run
//! use complaint_store::{RecordStore, StoreConfig, Status};
//!
//! let store = RecordStore::open(&StoreConfig::default())?;
//! if store.create("Alice", "CS-101", "Wi-Fi down in block C") {
//!     for c in store.find_by_roll_no("cs-101") {
//!         println!("{} {}", c.id, c.status);
//!     }
//! }
//! # let id: complaint_store::ComplaintId = "1".parse()?;
//! store.update_status(id, Status::Resolved);
//! # Ok::<(), complaint_store::StoreError>(())
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod formats;
pub mod query;
pub mod record;
pub mod storage;
pub mod store;

pub use auth::AdminCredentials;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use query::StoreStats;
pub use record::{Complaint, ComplaintId, Status};
pub use storage::{Directory, DurableDirectory, FsDirectory, MemoryDirectory, WritePolicy};
pub use store::{RecordStore, StoreOptions};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn store_in(dir: Arc<dyn Directory>) -> RecordStore {
        RecordStore::with_options(
            dir,
            "complaints_data.txt",
            StoreOptions::default().with_clock(|| NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()),
        )
    }

    #[test]
    fn submit_then_triage_in_memory() {
        let store = store_in(Arc::new(MemoryDirectory::new()));

        assert!(store.create("Alice", "CS-101", "Projector|broken"));
        assert!(store.create("Bob", "CS-102", "No water"));

        let all = store.list();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].issue, "Projector-broken");
        assert!(all.iter().all(|c| c.status == Status::Pending));

        let bob = all[1].id;
        assert!(store.update_status(bob, Status::InProgress));
        assert!(store.update_status(bob, Status::Resolved));
        assert!(store.update_status(bob, Status::Pending));
        assert_eq!(store.filter_by_status(Status::Pending).len(), 2);

        assert!(store.delete(all[0].id));
        assert!(!store.delete(all[0].id));
        assert_eq!(store.stats().total, 1);
    }

    #[test]
    fn same_semantics_on_filesystem() {
        let tmp = tempfile::tempdir().unwrap();
        let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(tmp.path()).unwrap());
        let store = store_in(dir);

        assert!(store.create("Alice", "CS-101", "Fan"));
        assert_eq!(
            store.read_all(),
            vec!["1|Alice|CS-101|2025-01-06|Fan|Pending".to_string()]
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("complaints_data.txt")).unwrap(),
            "1|Alice|CS-101|2025-01-06|Fan|Pending\n"
        );
    }
}
