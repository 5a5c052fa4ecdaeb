//! On-disk format constants and field sanitization.
//!
//! ## Public invariants (must not change without migrating existing files)
//!
//! - One record per line, terminated by `\n`. No header line. Existing `\r\n` terminators
//!   are read and preserved, never normalized.
//! - Fields are separated by [`DELIMITER`] in the order
//!   `id|name|roll_no|date|issue|status`.
//! - Every well-formed line has exactly [`FIELD_COUNT`] fields.
//! - Dates are written with [`DATE_FORMAT`].

use std::borrow::Cow;

/// Field separator.
pub const DELIMITER: char = '|';
/// What a delimiter in free text is rewritten to before storage.
pub const DELIMITER_REPLACEMENT: char = '-';
/// Fields per record.
pub const FIELD_COUNT: usize = 6;
/// `chrono` format string for the date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// File name used when no data path is configured.
pub const DEFAULT_DATA_FILE: &str = "complaints_data.txt";

/// Field positions within a line.
pub(crate) mod field {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const ROLL_NO: usize = 2;
    pub const DATE: usize = 3;
    pub const ISSUE: usize = 4;
    pub const STATUS: usize = 5;
}

/// Make free text safe to store as a single field.
///
/// The delimiter becomes [`DELIMITER_REPLACEMENT`]; line breaks become spaces so one record
/// can never span two lines.
pub fn sanitize_field(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            DELIMITER => DELIMITER_REPLACEMENT,
            '\r' | '\n' => ' ',
            c => c,
        })
        .collect()
}

/// Split a stored line into its fields, or `None` if the field count is wrong.
///
/// A trailing `\r` (CRLF files) is ignored. Field contents are otherwise returned verbatim.
pub fn split_fields(line: &str) -> Option<[&str; FIELD_COUNT]> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut out = [""; FIELD_COUNT];
    let mut parts = line.split(DELIMITER);
    for slot in out.iter_mut() {
        *slot = parts.next()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// One line of the file as stored: its content and the terminator that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawLine<'a> {
    /// Bytes before the terminator.
    pub content: &'a [u8],
    /// `\n`, `\r\n`, or empty for an unterminated last line.
    pub ending: &'a [u8],
}

impl<'a> RawLine<'a> {
    /// The content as text. Bytes that are not UTF-8 become U+FFFD; the id, date and status
    /// fields are ASCII, so matching is unaffected.
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.content)
    }
}

/// Split raw file bytes into lines, keeping each terminator so a rewrite can reproduce it.
pub(crate) fn raw_lines(bytes: &[u8]) -> Vec<RawLine<'_>> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let (line, tail) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => rest.split_at(i + 1),
            None => (rest, &rest[rest.len()..]),
        };
        let content_len = if line.ends_with(b"\r\n") {
            line.len() - 2
        } else if line.ends_with(b"\n") {
            line.len() - 1
        } else {
            line.len()
        };
        let (content, ending) = line.split_at(content_len);
        out.push(RawLine { content, ending });
        rest = tail;
    }
    out
}
