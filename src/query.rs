//! Read-side views over the store: the admin table, the student lookup, dashboard counts.
//!
//! Every view re-reads the file; nothing here is cached.

use crate::record::{Complaint, Status};
use crate::store::RecordStore;
use serde::Serialize;
use tracing::warn;

/// Complaints whose roll number matches `roll_no`, ignoring ASCII case and outer whitespace.
pub fn by_roll_no<'a>(complaints: &'a [Complaint], roll_no: &str) -> Vec<&'a Complaint> {
    let wanted = roll_no.trim();
    complaints
        .iter()
        .filter(|c| c.roll_no.trim().eq_ignore_ascii_case(wanted))
        .collect()
}

/// Complaints currently in `status`.
pub fn by_status(complaints: &[Complaint], status: Status) -> Vec<&Complaint> {
    complaints.iter().filter(|c| c.status == status).collect()
}

/// Dashboard counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Well-formed records.
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
    /// Non-blank lines that failed to parse.
    pub corrupt: usize,
}

impl StoreStats {
    /// Count raw lines as returned by [`RecordStore::read_all`].
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut stats = Self::default();
        for line in lines {
            let line: &str = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match Complaint::parse_line(line) {
                Ok(c) => stats.record(c.status),
                Err(_) => stats.corrupt += 1,
            }
        }
        stats
    }

    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Pending => self.pending += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Resolved => self.resolved += 1,
            Status::Rejected => self.rejected += 1,
        }
    }

    /// Count for one status.
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Pending => self.pending,
            Status::InProgress => self.in_progress,
            Status::Resolved => self.resolved,
            Status::Rejected => self.rejected,
        }
    }
}

impl RecordStore {
    /// Every well-formed complaint in file order. Empty on read failure.
    pub fn list(&self) -> Vec<Complaint> {
        self.try_list().unwrap_or_else(|e| {
            warn!(path = %self.path(), error = %e, "list failed");
            Vec::new()
        })
    }

    /// The student "track status" lookup.
    pub fn find_by_roll_no(&self, roll_no: &str) -> Vec<Complaint> {
        let all = self.list();
        by_roll_no(&all, roll_no).into_iter().cloned().collect()
    }

    /// Complaints currently in `status`.
    pub fn filter_by_status(&self, status: Status) -> Vec<Complaint> {
        let all = self.list();
        by_status(&all, status).into_iter().cloned().collect()
    }

    /// Dashboard counts for the current file.
    pub fn stats(&self) -> StoreStats {
        StoreStats::from_lines(&self.read_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ComplaintId;
    use chrono::NaiveDate;

    fn complaint(id: u64, roll_no: &str, status: Status) -> Complaint {
        let mut c = Complaint::new(
            ComplaintId::new(id).unwrap(),
            "Student",
            roll_no,
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            "issue",
        );
        c.status = status;
        c
    }

    #[test]
    fn roll_lookup_ignores_case_and_padding() {
        let all = vec![
            complaint(1, "cs-101", Status::Pending),
            complaint(2, "CS-102", Status::Pending),
            complaint(3, "CS-101", Status::Resolved),
        ];
        let ids: Vec<u64> = by_roll_no(&all, " CS-101 ")
            .iter()
            .map(|c| c.id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(by_roll_no(&all, "CS-10").is_empty());
    }

    #[test]
    fn status_filter_keeps_order() {
        let all = vec![
            complaint(1, "a", Status::Resolved),
            complaint(2, "b", Status::Pending),
            complaint(3, "c", Status::Resolved),
        ];
        let ids: Vec<u64> = by_status(&all, Status::Resolved)
            .iter()
            .map(|c| c.id.get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(by_status(&all, Status::Rejected).is_empty());
    }

    #[test]
    fn stats_count_statuses_and_corruption() {
        let lines = [
            "1|A|R1|2024-03-14|x|Pending",
            "2|B|R2|2024-03-14|y|In Progress",
            "",
            "3|C|R3|2024-03-14|z|Resolved",
            "4|D|R4",
            "5|E|R5|2024-03-14|w|Resolved",
        ];
        let stats = StoreStats::from_lines(&lines);
        assert_eq!(
            stats,
            StoreStats {
                total: 4,
                pending: 1,
                in_progress: 1,
                resolved: 2,
                rejected: 0,
                corrupt: 1,
            }
        );
        assert_eq!(stats.count(Status::Resolved), 2);
    }
}
