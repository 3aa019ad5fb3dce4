use std::path::PathBuf;
use thiserror::Error;

use crate::census::render::RenderError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to stat file '{path}': {source}")]
    FileStat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to create database directory '{path}': {source}")]
    DatabaseDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Regex error in construct '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
