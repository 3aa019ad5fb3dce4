use crate::error::Result;
use crate::options::SchemaMode;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default = "vec![String::from(\"adoc\")]")]
    pub extensions: Vec<String>,
    #[builder(default = "true")]
    pub hidden: bool,
    #[builder(default)]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extensions: vec![String::from("adoc")],
            hidden: true,
            git_ignore: false,
            max_depth: None,
            follow_links: false,
        }
    }
}

impl WalkOptions {
    /// Case-insensitive extension check. An empty list accepts every file.
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
    }
}

/// Markers and bucket rules for the per-line classifier.
///
/// `excluded_leading` lists leading characters that are kept out of the
/// special bucket. Such lines are counted in `total_lines` only.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(default)]
pub struct ClassifierConfig {
    #[builder(default = "String::from(\"//\")")]
    pub comment_marker: String,
    #[builder(default = "':'")]
    pub definition_marker: char,
    #[builder(default)]
    pub excluded_leading: Vec<char>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            comment_marker: String::from("//"),
            definition_marker: ':',
            excluded_leading: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    /// Load a classifier configuration from a YAML file. Missing keys keep
    /// their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// comment marker is empty.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns an error if the comment marker is empty.
    pub fn validate(&self) -> Result<()> {
        if self.comment_marker.is_empty() {
            return Err(crate::error::EngineError::Config(
                "comment_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct IndexConfig {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub classifier: ClassifierConfig,
    #[builder(default = "DEFAULT_WORKERS")]
    pub workers: usize,
    #[builder(default)]
    pub schema: SchemaMode,
    #[builder(default = "PathBuf::from(\"files.db\")")]
    pub db_path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            classifier: ClassifierConfig::default(),
            workers: DEFAULT_WORKERS,
            schema: SchemaMode::default(),
            db_path: PathBuf::from("files.db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_accepts_extension_case_insensitive() {
        let walk = WalkOptions::default();
        assert!(walk.accepts(Path::new("docs/intro.adoc")));
        assert!(walk.accepts(Path::new("docs/INTRO.ADOC")));
        assert!(!walk.accepts(Path::new("docs/intro.md")));
        assert!(!walk.accepts(Path::new("docs/README")));
    }

    #[test]
    fn test_empty_extension_list_accepts_all() {
        let walk = WalkOptionsBuilder::default()
            .extensions(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(walk.accepts(Path::new("anything")));
    }

    #[test]
    fn test_classifier_from_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "excluded_leading: [':', '/']").unwrap();

        let config = ClassifierConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.comment_marker, "//");
        assert_eq!(config.definition_marker, ':');
        assert_eq!(config.excluded_leading, vec![':', '/']);
    }

    #[test]
    fn test_classifier_rejects_empty_comment_marker() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "comment_marker: ''").unwrap();

        assert!(ClassifierConfig::from_yaml_file(file.path()).is_err());
    }

    #[test]
    fn test_index_builder_defaults() {
        let config = IndexConfigBuilder::default().build().unwrap();
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.schema, SchemaMode::Flat);
        assert_eq!(config.db_path, PathBuf::from("files.db"));
    }
}
