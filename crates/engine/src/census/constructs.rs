//! Construct tables for both sides of the census.
//!
//! The source table holds one regex per AsciiDoc construct; the structural
//! table holds one predicate per construct over rendered HTML nodes. Both
//! use the same construct vocabulary so their tallies line up by name.

use crate::census::render::StructuralNode;
use crate::error::{EngineError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

const ASCIIDOC_PATTERNS: &[(&str, &str)] = &[
    ("headings", r"^(={1,6})\s+"),
    ("bulleted_list", r"^(?:\*|-|\+)\s+"),
    ("ordered_list", r"^\d+\.\s+"),
    ("blockquote", r"^_{3,}"),
    ("literal_block", r"^(?:\+\+\+|----)$"),
    ("fenced_block", r"^```"),
    ("comment_block", r"^/{4,} "),
    ("table", r"^\|===|^\.\|"),
    ("admonition", r"^(?:NOTE|TIP|IMPORTANT|CAUTION|WARNING):\s+"),
    ("example_block", r"^====$"),
    ("sidebar_block", r"^\*{4}$"),
    ("listing_block", r"^----$"),
    ("verse_block", r"^\[verse\]"),
    ("inline_bold", r"\*\*(.*?)\*\*"),
    ("inline_italic", r"__(.*?)__"),
    ("inline_monospace", r"`(.+?)`"),
    ("inline_code", r"`(.+?)`"),
    ("inline_subscript", r"~(.+?)~"),
    ("inline_superscript", r"\^(.+?)\^"),
    ("inline_underline", r"\+\+(.*?)\+\+"),
    ("inline_link", r"https?://[^\s]+"),
    ("inline_image", r"image::[^\[]+\[.*\]"),
    ("inline_macro", r"\{[a-zA-Z0-9_]+\}"),
    ("inline_attributes", r"^:.*:"),
    ("checklist", r"^\* \[.\] "),
    ("description_list", r"^\S.*::$"),
    ("attribute_definitions", r"^\s*:(\w+):\s*"),
    ("cross_reference", r"<<.+?>>"),
    ("anchor", r"\[\[(.*?)\]\]"),
    ("inline_quote", r"^_{3,}"),
    ("literal_paragraph", r"^\+\+$"),
];

/// A named regex tested against raw source lines.
#[derive(Debug, Clone)]
pub struct SourcePattern {
    pub name: String,
    pub regex: Regex,
}

impl SourcePattern {
    /// # Errors
    /// Returns `Pattern` if `pattern` is not a valid regex.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|source| EngineError::Pattern {
            name: name.clone(),
            source,
        })?;
        Ok(Self { name, regex })
    }
}

/// Ordered table of source-side patterns.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    patterns: Vec<SourcePattern>,
}

impl SourceTable {
    /// The built-in AsciiDoc construct table.
    ///
    /// # Errors
    /// Only fails if a built-in pattern does not compile.
    pub fn asciidoc() -> Result<Self> {
        Self::from_entries(ASCIIDOC_PATTERNS.iter().copied())
    }

    /// # Errors
    /// Returns the first pattern that fails to compile.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let patterns = entries
            .into_iter()
            .map(|(name, pattern)| SourcePattern::new(name, pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Replace the pattern for an existing name in place, or append a new one.
    pub fn upsert(&mut self, pattern: SourcePattern) {
        match self.patterns.iter_mut().find(|p| p.name == pattern.name) {
            Some(slot) => *slot = pattern,
            None => self.patterns.push(pattern),
        }
    }

    pub fn patterns(&self) -> &[SourcePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// How a rendered node is recognised as a construct.
#[derive(Debug, Clone)]
pub enum StructuralRule {
    /// Element whose tag name matches the regex.
    Tag(Regex),
    /// Element whose tag matches and whose class list contains `class`.
    TagWithClass { tag: Regex, class: String },
    /// Any element whose class list contains `class`.
    ClassAnywhere(String),
    /// Element whose tag matches and that carries a non-empty `attr`.
    TagWithAttr { tag: Regex, attr: String },
    /// HTML comment node.
    Comment,
}

impl StructuralRule {
    pub fn matches(&self, node: &StructuralNode) -> bool {
        match (self, node) {
            (Self::Comment, StructuralNode::Comment(_)) => true,
            (Self::Tag(tag), StructuralNode::Element { tag: name, .. }) => tag.is_match(name),
            (Self::TagWithClass { tag, class }, StructuralNode::Element { tag: name, .. }) => {
                tag.is_match(name) && node.has_class(class)
            }
            (Self::ClassAnywhere(class), StructuralNode::Element { .. }) => node.has_class(class),
            (Self::TagWithAttr { tag, attr }, StructuralNode::Element { tag: name, .. }) => {
                tag.is_match(name) && node.attr(attr).is_some_and(|v| !v.is_empty())
            }
            _ => false,
        }
    }
}

/// A named predicate over rendered nodes. `selector` is the human-readable
/// description shown in the report.
#[derive(Debug, Clone)]
pub struct StructuralPredicate {
    pub name: String,
    pub selector: String,
    pub rule: StructuralRule,
}

#[derive(Debug, Clone, Default)]
pub struct StructuralTable {
    predicates: Vec<StructuralPredicate>,
}

fn tag(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| EngineError::Pattern {
        name: pattern.to_string(),
        source,
    })
}

impl StructuralTable {
    /// The built-in HTML table matching asciidoctor's output.
    ///
    /// Tag patterns are anchored (`^u$` never matches `ul`). `div.x` and
    /// `ul.x` selectors require that tag and class together, `.x` matches the
    /// class on any element, and `<!--` counts comment nodes.
    ///
    /// # Errors
    /// Only fails if a built-in tag regex does not compile.
    pub fn html() -> Result<Self> {
        use StructuralRule::{ClassAnywhere, Comment, Tag, TagWithAttr, TagWithClass};

        let with_class = |t: &str, class: &str| -> Result<StructuralRule> {
            Ok(TagWithClass {
                tag: tag(t)?,
                class: class.to_string(),
            })
        };

        let entries: Vec<(&str, &str, StructuralRule)> = vec![
            ("headings", "^h[1-6]$", Tag(tag("^h[1-6]$")?)),
            ("bulleted_list", "^ul$", Tag(tag("^ul$")?)),
            ("ordered_list", "^ol$", Tag(tag("^ol$")?)),
            ("blockquote", "^blockquote$", Tag(tag("^blockquote$")?)),
            ("literal_block", "^pre$", Tag(tag("^pre$")?)),
            ("fenced_block", "^code$", Tag(tag("^code$")?)),
            ("comment_block", "<!--", Comment),
            ("table", "^table$", Tag(tag("^table$")?)),
            ("admonition", "div.admonitionblock", with_class("^div$", "admonitionblock")?),
            ("example_block", "div.exampleblock", with_class("^div$", "exampleblock")?),
            ("sidebar_block", "div.sidebarblock", with_class("^div$", "sidebarblock")?),
            ("listing_block", "^pre$", Tag(tag("^pre$")?)),
            ("verse_block", "div.verseblock", with_class("^div$", "verseblock")?),
            ("inline_bold", "^strong$", Tag(tag("^strong$")?)),
            ("inline_italic", "^em$", Tag(tag("^em$")?)),
            ("inline_monospace", "^code$", Tag(tag("^code$")?)),
            ("inline_code", "^code$", Tag(tag("^code$")?)),
            ("inline_subscript", "^sub$", Tag(tag("^sub$")?)),
            ("inline_superscript", "^sup$", Tag(tag("^sup$")?)),
            ("inline_underline", "^u$", Tag(tag("^u$")?)),
            (
                "inline_link",
                "a[href]",
                TagWithAttr {
                    tag: tag("^a$")?,
                    attr: "href".to_string(),
                },
            ),
            ("inline_image", "^img$", Tag(tag("^img$")?)),
            ("inline_macro", "^span$", Tag(tag("^span$")?)),
            ("inline_attributes", "^span$", Tag(tag("^span$")?)),
            ("checklist", "ul.checklist", with_class("^ul$", "checklist")?),
            ("description_list", "^dl$", Tag(tag("^dl$")?)),
            ("attribute_definitions", "^meta$", Tag(tag("^meta$")?)),
            ("cross_reference", ".xref", ClassAnywhere("xref".to_string())),
            ("anchor", ".anchor", ClassAnywhere("anchor".to_string())),
            ("inline_quote", "^q$", Tag(tag("^q$")?)),
            ("literal_paragraph", ".literalblock", ClassAnywhere("literalblock".to_string())),
        ];

        Ok(Self {
            predicates: entries
                .into_iter()
                .map(|(name, selector, rule)| StructuralPredicate {
                    name: name.to_string(),
                    selector: selector.to_string(),
                    rule,
                })
                .collect(),
        })
    }

    pub fn from_predicates(predicates: Vec<StructuralPredicate>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &[StructuralPredicate] {
        &self.predicates
    }

    pub fn selector(&self, name: &str) -> Option<&str> {
        self.predicates
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.selector.as_str())
    }

    /// Position of `name` in the table, used to order report rows.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.predicates.iter().position(|p| p.name == name)
    }
}

/// Both construct tables, passed explicitly into a census run.
#[derive(Debug, Clone)]
pub struct CensusTables {
    pub source: SourceTable,
    pub structural: StructuralTable,
}

#[derive(Debug, Deserialize)]
struct SourceOverrides {
    #[serde(default)]
    source: Vec<SourceOverride>,
}

#[derive(Debug, Deserialize)]
struct SourceOverride {
    name: String,
    pattern: String,
}

impl CensusTables {
    /// The built-in AsciiDoc and HTML tables.
    ///
    /// # Errors
    /// Only fails if a built-in pattern does not compile.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            source: SourceTable::asciidoc()?,
            structural: StructuralTable::html()?,
        })
    }

    /// Built-in tables with source patterns overridden or extended from a
    /// YAML file of the form `source: [{name, pattern}, ...]`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or a pattern
    /// does not compile.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::builtin()?.with_overrides(&text)
    }

    fn with_overrides(mut self, yaml: &str) -> Result<Self> {
        let overrides: SourceOverrides = serde_yaml::from_str(yaml)?;
        for entry in overrides.source {
            self.source
                .upsert(SourcePattern::new(entry.name, &entry.pattern)?);
        }
        Ok(self)
    }
}
