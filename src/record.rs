//! The complaint record and its line codec.

use crate::error::{StoreError, StoreResult};
use crate::formats::{self, field, DATE_FORMAT, DELIMITER};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier of a complaint. Positive and assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ComplaintId(u64);

impl ComplaintId {
    /// The id given to the first record of an empty store.
    pub const FIRST: ComplaintId = ComplaintId(1);

    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// The raw integer value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one; `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse a stored id field. Only the form [`Display`](fmt::Display) writes is accepted:
    /// digits with no padding, sign, or leading zero.
    pub(crate) fn from_field(field: &str) -> Option<Self> {
        if field.is_empty() || field.starts_with('0') || !field.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        field.parse().ok().and_then(Self::new)
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = StoreError;

    /// Parses user input. Accepts surrounding whitespace and leading zeros; rejects signs,
    /// zero, and anything non-decimal.
    fn from_str(s: &str) -> StoreResult<Self> {
        let t = s.trim();
        if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StoreError::InvalidId(s.to_string()));
        }
        t.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| StoreError::InvalidId(s.to_string()))
    }
}

/// Lifecycle tag of a complaint.
///
/// Transitions are unrestricted: any status may move to any other, including back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    /// Newly submitted. Every record starts here.
    Pending,
    /// Picked up by an administrator.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Closed as fixed.
    Resolved,
    /// Closed without action.
    Rejected,
}

impl Status {
    /// Every status, in dashboard order.
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Resolved,
        Status::Rejected,
    ];

    /// Label written to disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
            Status::Rejected => "Rejected",
        }
    }

    /// Admin short codes: `R`esolved, in `P`rogress, re`X`ected.
    pub fn from_code(code: char) -> Option<Status> {
        match code.to_ascii_uppercase() {
            'R' => Some(Status::Resolved),
            'P' => Some(Status::InProgress),
            'X' => Some(Status::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        let t = s.trim();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| StoreError::InvalidStatus(s.to_string()))
    }
}

/// One parsed complaint line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub name: String,
    pub roll_no: String,
    pub date: NaiveDate,
    pub issue: String,
    pub status: Status,
}

impl Complaint {
    /// A fresh `Pending` complaint with every text field sanitized.
    pub fn new(id: ComplaintId, name: &str, roll_no: &str, date: NaiveDate, issue: &str) -> Self {
        Self {
            id,
            name: formats::sanitize_field(name),
            roll_no: formats::sanitize_field(roll_no),
            date,
            issue: formats::sanitize_field(issue),
            status: Status::Pending,
        }
    }

    /// Decode a stored line.
    pub fn parse_line(line: &str) -> StoreResult<Self> {
        let fields = formats::split_fields(line).ok_or_else(|| {
            StoreError::corrupt(line, format!("expected {} fields", formats::FIELD_COUNT))
        })?;
        let id = ComplaintId::from_field(fields[field::ID])
            .ok_or_else(|| StoreError::corrupt(line, "bad id"))?;
        let date = NaiveDate::parse_from_str(fields[field::DATE], DATE_FORMAT)
            .map_err(|e| StoreError::corrupt(line, format!("bad date: {e}")))?;
        let status = fields[field::STATUS]
            .parse::<Status>()
            .map_err(|_| StoreError::corrupt(line, "bad status"))?;
        Ok(Self {
            id,
            name: fields[field::NAME].to_string(),
            roll_no: fields[field::ROLL_NO].to_string(),
            date,
            issue: fields[field::ISSUE].to_string(),
            status,
        })
    }

    /// Encode as a stored line, without the trailing newline.
    pub fn to_line(&self) -> String {
        let d = DELIMITER;
        format!(
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.id,
            self.name,
            self.roll_no,
            self.date.format(DATE_FORMAT),
            self.issue,
            self.status
        )
    }
}

/// The id of a line with six fields and a canonical id field.
pub(crate) fn line_id(line: &str) -> Option<ComplaintId> {
    ComplaintId::from_field(formats::split_fields(line)?[field::ID])
}

/// Whether `line` is a well-formed line whose id is `id`.
pub(crate) fn line_has_id(line: &str, id: ComplaintId) -> bool {
    line_id(line) == Some(id)
}

/// Raw line content with only its status field replaced; `None` if the line does not have
/// six fields. Every byte before the status field, and a trailing `\r`, is kept as is.
pub(crate) fn with_status(content: &[u8], status: Status) -> Option<Vec<u8>> {
    formats::split_fields(&String::from_utf8_lossy(content))?;
    let (body, cr): (&[u8], &[u8]) = match content.strip_suffix(b"\r") {
        Some(body) => (body, &b"\r"[..]),
        None => (content, &b""[..]),
    };
    let cut = body.iter().rposition(|&b| b == DELIMITER as u8)? + 1;
    let mut out = Vec::with_capacity(cut + status.as_str().len() + cr.len());
    out.extend_from_slice(&body[..cut]);
    out.extend_from_slice(status.as_str().as_bytes());
    out.extend_from_slice(cr);
    Some(out)
}
