use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Tsv,
    Json,
}

/// Corpus schema depth (mirrors the engine's `SchemaMode`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
pub enum SchemaArg {
    /// files table only
    #[default]
    Flat,
    /// definition lines stored as strings
    Definitions,
    /// attribute names
    Attributes,
    /// attribute and value tables
    AttributeValues,
}
