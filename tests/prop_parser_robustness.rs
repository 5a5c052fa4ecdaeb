//! Robustness properties for the line parser and for reads over junk files.
//!
//! Not about accepting arbitrary input; about never panicking on it.

use complaint_store::storage::{Directory, FsDirectory};
use complaint_store::{Complaint, ComplaintId, RecordStore, Status};
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    #![proptest_config(ProptestConfig {
        failure_persistence: None,
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn parse_line_never_panics(line in ".{0,128}") {
        let _ = Complaint::parse_line(&line);
    }

    #[test]
    fn reads_and_misses_never_panic_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let tmp = tempfile::tempdir().unwrap();
        let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(tmp.path()).unwrap());
        dir.atomic_write("c.txt", &bytes).unwrap();

        let store = RecordStore::new(dir, "c.txt");
        let lines = store.read_all();
        let stats = store.stats();
        prop_assert!(stats.total + stats.corrupt <= lines.len());
        let _ = store.update_status(ComplaintId::new(u64::MAX).unwrap(), Status::Rejected);
    }

    #[test]
    fn lines_not_targeted_keep_their_bytes(
        junk in prop::collection::vec(any::<u8>().prop_filter("one line", |b| *b != b'\n'), 0..64),
        crlf in any::<bool>(),
    ) {
        let ending: &[u8] = if crlf { b"\r\n" } else { b"\n" };
        let mut file = junk;
        file.extend_from_slice(ending);
        let untouched = file.len();
        file.extend_from_slice(b"777|B|R2|2024-11-05|y|Pending");
        file.extend_from_slice(ending);

        let tmp = tempfile::tempdir().unwrap();
        let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(tmp.path()).unwrap());
        dir.atomic_write("c.txt", &file).unwrap();
        let store = RecordStore::new(dir, "c.txt");

        prop_assert!(store.update_status(ComplaintId::new(777).unwrap(), Status::Resolved));
        let after = std::fs::read(tmp.path().join("c.txt")).unwrap();
        prop_assert_eq!(&after[..untouched], &file[..untouched]);
        prop_assert!(after[untouched..].starts_with(b"777|B|R2|2024-11-05|y|Resolved"));
        prop_assert!(after.ends_with(ending));
    }
}

#[test]
fn junk_file_still_accepts_new_records() {
    let tmp = tempfile::tempdir().unwrap();
    let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(tmp.path()).unwrap());
    dir.atomic_write("c.txt", b"\xff\xfe junk\n|||||\n").unwrap();

    let store = RecordStore::new(dir, "c.txt");
    let c = store.try_create("A", "R1", "x").unwrap();
    assert_eq!(c.id, ComplaintId::FIRST);
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.stats().corrupt, 2);
}
