//! Line encoding between the catalog and an external fuzzy finder.
//!
//! Each line carries the record index and a readable label, split by the
//! ASCII unit separator (U+001F):
//!
//! ```text
//!  7\u{1f}Rust Book — https://doc.rust-lang.org/book/
//! ```
//!
//! The index is right-aligned to a fixed width. Control characters are
//! stripped from the label, so the separator only ever appears once and the
//! index can always be recovered from the line the finder hands back.

use crate::bookmark::BookmarkRecord;
use crate::{Error, Result};

/// Field separator between the index and the label
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Encodes records for a finder and maps selections back to them
#[derive(Debug, Clone)]
pub struct SearchFeed<'a> {
    records: Vec<&'a BookmarkRecord>,
    width: usize,
}

impl<'a> SearchFeed<'a> {
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BookmarkRecord>,
    {
        let records: Vec<&BookmarkRecord> = records.into_iter().collect();
        let width = records.len().saturating_sub(1).to_string().len();
        Self { records, width }
    }

    /// One line per record, in feed order
    pub fn encode(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| encode_line(index, self.width, record))
            .collect()
    }

    /// Recover the record index from a line produced by [`encode`](Self::encode)
    pub fn decode(&self, line: &str) -> Result<usize> {
        let index = decode_index(line)?;
        if index >= self.records.len() {
            return Err(Error::Decode(format!(
                "index {} is out of range ({} records)",
                index,
                self.records.len()
            )));
        }
        Ok(index)
    }

    pub fn record(&self, index: usize) -> Option<&'a BookmarkRecord> {
        self.records.get(index).copied()
    }

    /// Preview text for the finder's preview pane
    pub fn preview(&self, index: usize) -> Option<String> {
        self.record(index).map(preview_text)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Encode a single record as a feed line
pub fn encode_line(index: usize, width: usize, record: &BookmarkRecord) -> String {
    format!(
        "{index:>width$}{FIELD_SEPARATOR}{} — {}",
        sanitize(record.display_title()),
        sanitize(record.url()),
    )
}

/// Parse the index field of a feed line without checking it against a feed
pub fn decode_index(line: &str) -> Result<usize> {
    let line = line.trim_end_matches(['\n', '\r']);

    let (index, _label) = line.split_once(FIELD_SEPARATOR).ok_or_else(|| {
        Error::Decode(format!("missing field separator in line: {:?}", line))
    })?;

    index
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Decode(format!("invalid index field: {:?}", index)))
}

fn preview_text(record: &BookmarkRecord) -> String {
    let mut lines = vec![record.url().to_string()];

    if !record.folder_path().is_empty() {
        lines.push(format!("Folder: {}", record.folder_path().join(" / ")));
    }

    lines.push(format!(
        "Source: {} ({})",
        record.browser().display_name(),
        record.profile()
    ));

    lines.join("\n")
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
