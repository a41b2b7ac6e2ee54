use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SubkitError};
use crate::subtitle::SubtitleFormat;

/// A subtitle file found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: SubtitleFormat,
    pub size: u64,
}

/// Find every `.lrc` / `.srt` file under `dir`, sorted by path.
///
/// Only the top level is listed unless `recursive` is set. Unreadable
/// entries are logged and skipped.
pub fn scan_directory<P: AsRef<Path>>(dir: P, recursive: bool) -> Result<Vec<SubtitleFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SubkitError::FileNotFound(dir.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(format) = SubtitleFormat::from_path(entry.path()) else {
            continue;
        };

        let size = entry.metadata()?.len();
        files.push(SubtitleFile {
            path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            format,
            size,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Found {} subtitle files in {}", files.len(), dir.display());
    Ok(files)
}
