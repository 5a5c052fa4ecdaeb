//! Human and JSON renderings of store output.

use complaint_store::{Complaint, StoreStats};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Admin table: id, roll number, name, status, issue.
pub fn admin_table(rows: &[Complaint], mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return "(no complaints found)".to_string();
    }
    let mut out = format!(
        "{:<4} | {:<12} | {:<15} | {:<12} | {}\n{}",
        "ID",
        "ROLL NO",
        "NAME",
        "STATUS",
        "ISSUE",
        "-".repeat(72)
    );
    for c in rows {
        out.push_str(&format!(
            "\n{:<4} | {:<12} | {:<15} | {:<12} | {}",
            c.id, c.roll_no, c.name, c.status, c.issue
        ));
    }
    out
}

/// Student view: id, status, issue.
pub fn student_table(rows: &[Complaint], mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return "no complaints found for this roll number".to_string();
    }
    let mut out = format!("{:<4} | {:<12} | {}", "ID", "STATUS", "ISSUE");
    for c in rows {
        out.push_str(&format!("\n{:<4} | {:<12} | {}", c.id, c.status, c.issue));
    }
    out
}

pub fn stats(stats: &StoreStats, mode: OutputMode) -> String {
    if mode == OutputMode::Json {
        return to_json(stats);
    }
    let mut out = format!(
        "total: {}\npending: {}\nin progress: {}\nresolved: {}\nrejected: {}",
        stats.total, stats.pending, stats.in_progress, stats.resolved, stats.rejected
    );
    if stats.corrupt > 0 {
        out.push_str(&format!("\ncorrupt lines skipped: {}", stats.corrupt));
    }
    out
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
