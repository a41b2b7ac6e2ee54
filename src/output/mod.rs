// Output writing
//
// Converted and extracted subtitles are written through an OutputWriter so the
// workflow does not care how name collisions are resolved:
// - writer: file-system implementation with overwrite / index-suffix policies

pub mod writer;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use writer::*;

use crate::config::ConflictPolicy;
use crate::error::Result;

/// Destination for generated subtitle files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputWriter: Send + Sync {
    /// Write `content` as `file_name` inside `directory` and return the path
    /// actually written, which may differ from the requested name.
    async fn write(&self, directory: &Path, file_name: &str, content: &str) -> Result<PathBuf>;
}

/// Factory for creating output writer instances
pub struct OutputWriterFactory;

impl OutputWriterFactory {
    /// Create the default file-system writer for the given conflict policy
    pub fn create_writer(policy: ConflictPolicy) -> Box<dyn OutputWriter> {
        Box::new(writer::FsOutputWriter::new(policy))
    }
}
