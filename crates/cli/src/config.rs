// crates/cli/src/config.rs
use crate::args::{CensusArgs, IndexArgs};
use crate::error::{AppError, Result};
use crate::options::SchemaArg;
pub use adoc_tally_engine::config::{
    ClassifierConfig, IndexConfig, IndexConfigBuilder, WalkOptions, WalkOptionsBuilder,
};
use adoc_tally_engine::census::render::CommandRenderer;
use adoc_tally_engine::options::SchemaMode;

impl TryFrom<&IndexArgs> for IndexConfig {
    type Error = AppError;

    fn try_from(args: &IndexArgs) -> Result<Self> {
        let mut classifier = match &args.config {
            Some(path) => ClassifierConfig::from_yaml_file(path)?,
            None => ClassifierConfig::default(),
        };
        // The command line wins over the config file.
        if let Some(chars) = &args.exclude_special {
            classifier.excluded_leading.clone_from(&chars.0);
        }

        let walk = walk_options_from_args(args);

        IndexConfigBuilder::default()
            .walk(walk)
            .classifier(classifier)
            .workers(args.workers)
            .schema(SchemaMode::from(args.schema))
            .db_path(args.db.clone())
            .build()
            .map_err(|e| AppError::Usage(e.to_string()))
    }
}

fn walk_options_from_args(args: &IndexArgs) -> WalkOptions {
    let defaults = WalkOptions::default();
    let extensions: Vec<String> = args
        .ext
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect();

    WalkOptions {
        extensions: if extensions.is_empty() {
            defaults.extensions.clone()
        } else {
            extensions
        },
        max_depth: args.max_depth,
        follow_links: args.follow,
        ..defaults
    }
}

impl CensusArgs {
    /// The configured renderer. The bare default program gets its default
    /// arguments; any other program runs with exactly the given ones.
    pub fn renderer(&self) -> CommandRenderer {
        let default = CommandRenderer::asciidoctor();
        if self.renderer_args.is_empty() && self.renderer == default.program {
            default
        } else {
            CommandRenderer::new(self.renderer.clone(), self.renderer_args.clone())
        }
    }
}

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(
    SchemaArg,
    SchemaMode,
    Flat,
    Definitions,
    Attributes,
    AttributeValues
);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_args() {
        let args = IndexArgs::try_parse_from([
            "adoc_index",
            "docs",
            "--ext",
            ".adoc,.asc",
            "--schema",
            "definitions",
            "--workers",
            "3",
            "--db",
            "out/corpus.db",
        ])
        .unwrap();
        let config = IndexConfig::try_from(&args).unwrap();

        assert_eq!(config.walk.extensions, vec!["adoc", "asc"]);
        assert_eq!(config.schema, SchemaMode::Definitions);
        assert_eq!(config.workers, 3);
        assert_eq!(config.db_path, PathBuf::from("out/corpus.db"));
        assert_eq!(config.classifier, ClassifierConfig::default());
    }

    #[test]
    fn test_exclude_special_overrides_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "comment_marker: '#'\nexcluded_leading: ['*']").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let args = IndexArgs::try_parse_from([
            "adoc_index",
            "docs",
            "--config",
            path.as_str(),
            "--exclude-special",
            ":/",
        ])
        .unwrap();
        let config = IndexConfig::try_from(&args).unwrap();

        assert_eq!(config.classifier.comment_marker, "#");
        assert_eq!(config.classifier.excluded_leading, vec![':', '/']);
    }

    #[test]
    fn test_default_renderer_args() {
        let args = CensusArgs::try_parse_from(["adoc_census", "doc.adoc"]).unwrap();
        assert_eq!(args.renderer(), CommandRenderer::asciidoctor());

        let args = CensusArgs::try_parse_from(["adoc_census", "doc.adoc", "--renderer", "cat"])
            .unwrap();
        assert_eq!(args.renderer(), CommandRenderer::new("cat", vec![]));
    }
}
