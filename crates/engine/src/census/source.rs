use crate::census::constructs::SourceTable;
use crate::census::tally::Tally;
use serde::Serialize;
use tracing::debug;

/// A single pattern match on a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructHit {
    pub origin: String,
    pub line_no: usize,
    pub construct: String,
}

#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub tally: Tally,
    pub hits: Vec<ConstructHit>,
}

/// Test every pattern against every line.
///
/// Matching is non-exclusive: one line may count towards several
/// constructs, and there is no early exit.
pub fn classify_source(text: &str, origin: &str, table: &SourceTable) -> SourceScan {
    let mut scan = SourceScan::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        for pattern in table.patterns() {
            if pattern.regex.is_match(line) {
                scan.tally.increment(&pattern.name);
                debug!("Found {} in {origin} at line {line_no}", pattern.name);
                scan.hits.push(ConstructHit {
                    origin: origin.to_string(),
                    line_no,
                    construct: pattern.name.clone(),
                });
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> SourceScan {
        classify_source(text, "doc.adoc", &SourceTable::asciidoc().unwrap())
    }

    #[test]
    fn test_single_heading() {
        let result = scan("== Title");
        assert_eq!(result.tally.get("headings"), 1);
        for name in ["inline_bold", "inline_italic", "inline_code", "inline_link"] {
            assert_eq!(result.tally.get(name), 0, "{name}");
        }
        assert_eq!(
            result.hits,
            vec![ConstructHit {
                origin: "doc.adoc".to_string(),
                line_no: 1,
                construct: "headings".to_string(),
            }]
        );
    }

    #[test]
    fn test_non_exclusive_matching() {
        let result = scan("== A **bold** heading");
        assert_eq!(result.tally.get("headings"), 1);
        assert_eq!(result.tally.get("inline_bold"), 1);
        assert_eq!(result.hits.len(), 2);
    }

    #[test]
    fn test_shared_patterns_both_count() {
        let result = scan("use `cargo` here");
        assert_eq!(result.tally.get("inline_monospace"), 1);
        assert_eq!(result.tally.get("inline_code"), 1);
    }

    #[test]
    fn test_counts_per_line_not_per_occurrence() {
        let result = scan("**a** and **b**\nplain\n**c**");
        assert_eq!(result.tally.get("inline_bold"), 2);
        let lines: Vec<_> = result.hits.iter().map(|h| h.line_no).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_block_delimiters() {
        let result = scan("----\ncode\n----\n====\n****\n|===\n[verse]\n");
        assert_eq!(result.tally.get("listing_block"), 2);
        assert_eq!(result.tally.get("literal_block"), 2);
        assert_eq!(result.tally.get("example_block"), 1);
        assert_eq!(result.tally.get("sidebar_block"), 1);
        assert_eq!(result.tally.get("table"), 1);
        assert_eq!(result.tally.get("verse_block"), 1);
    }

    #[test]
    fn test_attribute_line_counts_twice() {
        let result = scan(":toc: left");
        assert_eq!(result.tally.get("inline_attributes"), 1);
        assert_eq!(result.tally.get("attribute_definitions"), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let result = scan("----\r\nbody\r\n----\r\n");
        assert_eq!(result.tally.get("listing_block"), 2);
    }

    #[test]
    fn test_empty_document() {
        let result = scan("");
        assert!(result.tally.is_empty());
        assert!(result.hits.is_empty());
    }
}
