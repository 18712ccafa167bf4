//! Text dictionary formats that `dictool compile` reads.

mod skk;
mod tsv;


use std::fs;
use std::io;
use std::path::Path;

use kkbd_core::okuri::split_okuri_key;

pub use skk::SkkSource;
pub use tsv::TsvSource;

/// A line-oriented dictionary text format.
pub trait DictSource {
    /// Parse one non-empty, non-comment line into a key and its surfaces.
    /// Returns `None` for lines the format does not understand.
    fn parse_line(&self, line: &str) -> Option<(String, Vec<String>)>;

    /// Whether `line` is a comment in this format.
    fn is_comment(&self, line: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Entries read from a dictionary text, in file order.
#[derive(Debug, Default)]
pub struct ParsedDict {
    pub entries: Vec<(String, Vec<String>)>,
    pub lines: usize,
    pub skipped: usize,
}

/// True for a hiragana reading, optionally followed by one okuri letter.
pub(crate) fn is_dict_key(key: &str) -> bool {
    let (reading, _) = split_okuri_key(key);
    kkbd_core::unicode::is_hiragana_reading(reading)
}

/// Parse `text` line by line, skipping blank lines, comments, lines the
/// format rejects, and lines whose key is not a hiragana (okuri) key.
pub fn parse_dict_text(source: &dyn DictSource, text: &str) -> ParsedDict {
    let mut parsed = ParsedDict::default();
    for line in text.lines() {
        parsed.lines += 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || source.is_comment(line) {
            parsed.skipped += 1;
            continue;
        }
        match source.parse_line(line) {
            Some((key, surfaces)) if is_dict_key(&key) && !surfaces.is_empty() => {
                parsed.entries.push((key, surfaces));
            }
            _ => parsed.skipped += 1,
        }
    }
    parsed
}

/// Read and parse a UTF-8 dictionary file. A file with no usable entries is
/// an error.
pub fn parse_dict_file(source: &dyn DictSource, path: &Path) -> Result<ParsedDict, DictSourceError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        DictSourceError::Parse(format!(
            "{} is not UTF-8 (byte {}); convert EUC-JP dictionaries first",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;
    let parsed = parse_dict_text(source, &text);
    if parsed.entries.is_empty() {
        return Err(DictSourceError::Parse(format!(
            "no dictionary entries found in {}",
            path.display()
        )));
    }
    Ok(parsed)
}

/// Create a `DictSource` by name. Returns `None` for unknown source names.
pub fn from_name(name: &str) -> Option<Box<dyn DictSource>> {
    match name {
        "skk" => Some(Box::new(SkkSource)),
        "tsv" => Some(Box::new(TsvSource)),
        _ => None,
    }
}
