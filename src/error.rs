use thiserror::Error;

use crate::subtitle::SubtitleFormat;

#[derive(Error, Debug)]
pub enum SubkitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported conversion: {from} -> {to}")]
    UnsupportedConversion {
        from: SubtitleFormat,
        to: SubtitleFormat,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, SubkitError>;
