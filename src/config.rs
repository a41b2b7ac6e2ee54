use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::convert::ConvertOptions;
use crate::error::{Result, SubkitError};
use crate::language::TargetLanguage;

fn default_duration_ms() -> u64 {
    2000
}

fn default_min_duration_ms() -> u64 {
    300
}

fn default_keep() -> TargetLanguage {
    TargetLanguage::Zh
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Display duration of the last block when converting LRC to SRT
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    /// Shortest duration any generated SRT block may have
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Language retained when extracting from bilingual subtitles
    #[serde(default = "default_keep")]
    pub keep: TargetLanguage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// What to do when the output file already exists
    #[serde(default)]
    pub conflict: ConflictPolicy,
    /// Output directory; defaults to the directory of each input file
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Descend into subdirectories for batch commands
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictPolicy {
    /// Replace the existing file
    Overwrite,
    /// Append " (1)", " (2)", ... to the file stem until the name is free
    #[default]
    IndexSuffix,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            min_duration_ms: default_min_duration_ms(),
        }
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            default_duration_ms: config.default_duration_ms,
            min_duration_ms: config.min_duration_ms,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            keep: default_keep(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            conflict: ConflictPolicy::IndexSuffix,
            directory: None,
            recursive: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubkitError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SubkitError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubkitError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubkitError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.convert.default_duration_ms, 2000);
        assert_eq!(config.convert.min_duration_ms, 300);
        assert_eq!(config.extract.keep, TargetLanguage::Zh);
        assert_eq!(config.output.conflict, ConflictPolicy::IndexSuffix);
        assert!(config.output.directory.is_none());
        assert!(!config.output.recursive);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [convert]
            default_duration_ms = 3500

            [extract]
            keep = "JA"

            [output]
            conflict = "Overwrite"
            directory = "out"
            "#,
        )
        .unwrap();

        assert_eq!(config.convert.default_duration_ms, 3500);
        assert_eq!(config.convert.min_duration_ms, 300);
        assert_eq!(config.extract.keep, TargetLanguage::Ja);
        assert_eq!(config.output.conflict, ConflictPolicy::Overwrite);
        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_convert_section_maps_to_options() {
        let config = Config::from_toml_str("[convert]\nmin_duration_ms = 500").unwrap();
        let options = ConvertOptions::from(&config.convert);
        assert_eq!(options.default_duration_ms, 2000);
        assert_eq!(options.min_duration_ms, 500);

        assert_eq!(
            ConvertOptions::from(&ConvertConfig::default()),
            ConvertOptions::default()
        );
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let err = Config::from_toml_str("[extract]\nkeep = \"EN\"").unwrap_err();
        assert!(matches!(err, SubkitError::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subkit.toml");

        let mut config = Config::default();
        config.extract.keep = TargetLanguage::Ja;
        config.convert.default_duration_ms = 1500;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.extract.keep, TargetLanguage::Ja);
        assert_eq!(loaded.convert.default_duration_ms, 1500);
    }
}
