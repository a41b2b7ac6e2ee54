// Subtitle containers handled by the toolbox
//
// - lrc: timestamp-tagged lyric lines, grouped by time
// - srt: numbered blocks with a start --> end range

pub mod lrc;
pub mod srt;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use lrc::*;
pub use srt::*;

use crate::error::{Result, SubkitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubtitleFormat {
    Lrc,
    Srt,
}

impl SubtitleFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::Srt => "srt",
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Lrc => "LRC",
            Self::Srt => "SRT",
        }
    }

    /// Detect the format from a file name's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SubkitError::UnsupportedFileType(path.display().to_string()))?;

        extension.parse()
    }
}

impl FromStr for SubtitleFormat {
    type Err = SubkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "lrc" => Ok(Self::Lrc),
            "srt" => Ok(Self::Srt),
            _ => Err(SubkitError::UnsupportedFileType(s.to_string())),
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Result of a conversion or extraction: the new file name and its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub output_file_name: String,
    pub output_content: String,
}

/// Replace the extension of `file_name`, keeping the rest of the name
pub fn replace_extension(file_name: &str, format: SubtitleFormat) -> String {
    Path::new(file_name)
        .with_extension(format.extension())
        .to_string_lossy()
        .into_owned()
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("LRC".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Lrc);
        assert_eq!("srt".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Srt);
        assert_eq!(".Srt".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Srt);
        assert!(matches!(
            "vtt".parse::<SubtitleFormat>(),
            Err(SubkitError::UnsupportedFileType(t)) if t == "vtt"
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SubtitleFormat::from_path("a/b/song.LRC").unwrap(), SubtitleFormat::Lrc);
        assert_eq!(SubtitleFormat::from_path("movie.srt").unwrap(), SubtitleFormat::Srt);
        assert!(SubtitleFormat::from_path("movie").is_err());
        assert!(SubtitleFormat::from_path("movie.ass").is_err());
    }

    #[test]
    fn test_replace_extension() {
        assert_eq!(replace_extension("song.lrc", SubtitleFormat::Srt), "song.srt");
        assert_eq!(replace_extension("ep.01.srt", SubtitleFormat::Lrc), "ep.01.lrc");
        assert_eq!(replace_extension("noext", SubtitleFormat::Srt), "noext.srt");
    }
}
