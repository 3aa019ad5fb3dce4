use crate::config::ClassifierConfig;
use crate::error::{EngineError, Result};
use crate::stats::{Definition, FileMetrics, LineCounts};
use chrono::{DateTime, Local};
use hashbrown::HashSet;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

/// Bucket assigned to a single physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    Comment,
    /// Trimmed text after the marker and the parsed pair, if any.
    Definition {
        text: String,
        pair: Option<Definition>,
    },
    /// Leading character is in the configured excluded set.
    Excluded,
    Alnum,
    Special,
}

/// Classify one line. The chain is evaluated top to bottom and the first
/// match wins, so every non-blank line lands in exactly one bucket.
pub fn classify_line(line: &str, config: &ClassifierConfig) -> LineClass {
    let stripped = line.trim_start();
    let Some(first) = stripped.chars().next() else {
        return LineClass::Blank;
    };

    if stripped.starts_with(config.comment_marker.as_str()) {
        return LineClass::Comment;
    }

    if let Some(rest) = stripped.strip_prefix(config.definition_marker) {
        return LineClass::Definition {
            text: rest.trim().to_string(),
            pair: parse_definition(rest, config.definition_marker),
        };
    }

    if config.excluded_leading.contains(&first) {
        LineClass::Excluded
    } else if first.is_alphanumeric() {
        LineClass::Alnum
    } else {
        LineClass::Special
    }
}

/// Split the text after a definition marker into `attribute` and `value`.
///
/// `foo: bar` gives `("foo", "bar")`, `flagonly:` gives `("flagonly", "")`.
/// An empty attribute yields `None`.
pub fn parse_definition(rest: &str, marker: char) -> Option<Definition> {
    let (attribute, value) = rest.split_once(marker).unwrap_or((rest, ""));
    let attribute = attribute.trim();
    if attribute.is_empty() {
        return None;
    }
    Some(Definition::new(attribute, value.trim()))
}

/// Running tally for one file's lines.
#[derive(Debug, Default)]
pub struct LineTally {
    pub counts: LineCounts,
    pub definitions: Vec<Definition>,
    pub definition_texts: Vec<String>,
    seen_pairs: HashSet<Definition>,
    seen_texts: HashSet<String>,
}

impl LineTally {
    pub fn push_line(&mut self, line: &str, config: &ClassifierConfig) {
        self.counts.total_lines += 1;

        match classify_line(line, config) {
            LineClass::Blank | LineClass::Excluded => {}
            LineClass::Comment => self.counts.comment_lines += 1,
            LineClass::Alnum => self.counts.alnum_start += 1,
            LineClass::Special => self.counts.special_start += 1,
            LineClass::Definition { text, pair } => {
                self.counts.definition_lines += 1;
                if !text.is_empty() && self.seen_texts.insert(text.clone()) {
                    self.definition_texts.push(text);
                }
                if let Some(pair) = pair
                    && self.seen_pairs.insert(pair.clone())
                {
                    self.definitions.push(pair);
                }
            }
        }
    }

    /// Consume a reader line by line. Invalid UTF-8 sequences are dropped.
    ///
    /// # Errors
    /// Returns the underlying I/O error if a read fails.
    pub fn read_from<R: BufRead>(
        reader: &mut R,
        config: &ClassifierConfig,
    ) -> std::io::Result<Self> {
        let mut tally = Self::default();
        let mut line_buf = Vec::new();

        loop {
            line_buf.clear();
            if reader.read_until(b'\n', &mut line_buf)? == 0 {
                break;
            }
            let line = decode_dropping_invalid(&line_buf);
            tally.push_line(&line, config);
        }

        Ok(tally)
    }
}

fn decode_dropping_invalid(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Cow::Owned(text)
}

/// Path of `path` relative to `base`, or its bare file name when it lies
/// outside `base`.
pub fn relative_path(path: &Path, base: &Path) -> String {
    let abs_path = normalize(path);
    let abs_base = normalize(base);

    match abs_path.strip_prefix(&abs_base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        _ => abs_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

/// Absolute form of `path` with `.` and `..` folded lexically.
fn normalize(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Stat and read a single file and compute its metrics.
///
/// # Errors
/// Returns `FileStat` or `FileRead` when the file cannot be inspected.
/// Callers treat either as "skip this file".
pub fn analyze_file(path: &Path, base: &Path, config: &ClassifierConfig) -> Result<FileMetrics> {
    let meta = std::fs::metadata(path).map_err(|e| EngineError::FileStat {
        path: path.to_path_buf(),
        source: e,
    })?;

    let modified = meta.modified().ok().map(DateTime::<Local>::from);
    let created = meta
        .created()
        .ok()
        .map(DateTime::<Local>::from)
        .or(modified);

    let read_err = |e: std::io::Error| EngineError::FileRead {
        path: PathBuf::from(path),
        source: e,
    };
    let file = File::open(path).map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let tally = LineTally::read_from(&mut reader, config).map_err(read_err)?;

    let mut metrics = FileMetrics::new(relative_path(path, base));
    metrics.created = created;
    metrics.modified = modified;
    metrics.size = meta.len();
    metrics.counts = tally.counts;
    metrics.definitions = tally.definitions;
    metrics.definition_texts = tally.definition_texts;

    Ok(metrics)
}
