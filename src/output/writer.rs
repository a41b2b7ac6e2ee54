use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::config::ConflictPolicy;
use crate::error::Result;
use super::OutputWriter;

/// Writes files to disk, resolving name collisions with a ConflictPolicy
pub struct FsOutputWriter {
    policy: ConflictPolicy,
}

impl FsOutputWriter {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { policy }
    }

    /// Pick the path to write to. With `IndexSuffix`, `name.srt` becomes
    /// `name (1).srt`, `name (2).srt`, ... until an unused name is found.
    async fn resolve_target(&self, directory: &Path, file_name: &str) -> Result<PathBuf> {
        let target = directory.join(file_name);

        if self.policy == ConflictPolicy::Overwrite || !fs::try_exists(&target).await? {
            return Ok(target);
        }

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let extension = name.extension().map(|e| e.to_string_lossy().into_owned());

        let mut index = 1u32;
        loop {
            let candidate_name = match &extension {
                Some(ext) => format!("{} ({}).{}", stem, index, ext),
                None => format!("{} ({})", stem, index),
            };
            let candidate = directory.join(&candidate_name);
            if !fs::try_exists(&candidate).await? {
                debug!("{} exists, writing {} instead", target.display(), candidate_name);
                return Ok(candidate);
            }
            index += 1;
        }
    }
}

#[async_trait]
impl OutputWriter for FsOutputWriter {
    async fn write(&self, directory: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(directory).await?;

        let target = self.resolve_target(directory, file_name).await?;
        fs::write(&target, content).await?;

        info!("Wrote {}", target.display());
        Ok(target)
    }
}
