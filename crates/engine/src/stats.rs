use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::EngineError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const TIMESTAMP_FORMAT_WHOLE: &str = "%Y-%m-%dT%H:%M:%S";

/// One `attribute`/`value` pair parsed from a definition line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
    pub attribute: String,
    pub value: String,
}

impl Definition {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Per-line bucket counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub total_lines: usize,
    pub alnum_start: usize,
    pub special_start: usize,
    pub comment_lines: usize,
    pub definition_lines: usize,
}

impl LineCounts {
    /// Lines that landed in one of the four classified buckets.
    pub const fn classified(&self) -> usize {
        self.alnum_start + self.special_start + self.comment_lines + self.definition_lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    /// Path relative to the scan base; primary key in the corpus.
    pub path: String,
    pub filename: String,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub size: u64,
    #[serde(flatten)]
    pub counts: LineCounts,
    /// Unique pairs in first-seen order.
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Unique trimmed definition texts in first-seen order.
    #[serde(default)]
    pub definition_texts: Vec<String>,
}

impl FileMetrics {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            filename,
            created: None,
            modified: None,
            size: 0,
            counts: LineCounts::default(),
            definitions: Vec::new(),
            definition_texts: Vec::new(),
        }
    }

    pub fn created_str(&self) -> Option<String> {
        self.created.as_ref().map(format_timestamp)
    }

    pub fn modified_str(&self) -> Option<String> {
        self.modified.as_ref().map(format_timestamp)
    }
}

/// ISO-8601 local time without offset. The fraction is omitted when the
/// microsecond part is zero.
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    if ts.timestamp_subsec_micros() == 0 {
        ts.format(TIMESTAMP_FORMAT_WHOLE).to_string()
    } else {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Outcome of an index run: records for every readable file plus the
/// per-file failures that were skipped.
#[derive(Debug, Default)]
pub struct IndexRun {
    pub records: Vec<FileMetrics>,
    pub errors: Vec<(PathBuf, EngineError)>,
}

impl IndexRun {
    pub fn processed(&self) -> usize {
        self.records.len()
    }
}
