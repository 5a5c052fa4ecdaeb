//! Minimal "presentation shell" driving the record store.
//!
//! A student submits two complaints, checks them by roll number, and an admin triages them.
//!
//! Run:
//! `cargo run --example triage_session`

use complaint_store::storage::FsDirectory;
use complaint_store::{AdminCredentials, ComplaintId, Directory, RecordStore, Status};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let dir: Arc<dyn Directory> = Arc::new(FsDirectory::new(tmp.path())?);
    let store = RecordStore::new(dir, "complaints_data.txt");

    // Student side.
    for issue in ["Wi-Fi|router dead in block C", "Fan not working in room 12"] {
        if !store.create("Asha", "CS-101", issue) {
            eprintln!("could not save complaint");
        }
    }
    for c in store.find_by_roll_no("cs-101") {
        println!("[student] #{} {:<12} {}", c.id, c.status, c.issue);
    }

    // Admin side.
    let admin = AdminCredentials::default();
    if !admin.verify("admin", "admin123") {
        return Err("login refused".into());
    }
    let first = store.list()[0].id;
    let code = 'R';
    let status = Status::from_code(code).ok_or("bad status code")?;
    if store.update_status(first, status) {
        println!("[admin] complaint {first} -> {status}");
    }
    let missing: ComplaintId = "99".parse()?;
    if !store.delete(missing) {
        println!("[admin] complaint {missing} not found");
    }

    let stats = store.stats();
    println!(
        "[admin] total={} pending={} resolved={}",
        stats.total, stats.pending, stats.resolved
    );
    for line in store.read_all() {
        println!("{line}");
    }
    Ok(())
}
