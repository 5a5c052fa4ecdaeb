#![no_main]

use complaint_store::storage::{Directory, MemoryDirectory};
use complaint_store::{ComplaintId, RecordStore, Status};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    let dir: Arc<dyn Directory> = Arc::new(MemoryDirectory::new());
    // Put arbitrary bytes under the expected data path.
    dir.atomic_write("complaints_data.txt", data).ok();
    let store = RecordStore::new(dir, "complaints_data.txt");
    let _ = store.list();
    let _ = store.stats();
    let _ = store.update_status(ComplaintId::FIRST, Status::Resolved);
    let _ = store.try_create("fuzz", "F-1", "x");
});
