use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::Config;
use crate::convert::{convert, ConvertOptions};
use crate::error::{Result, SubkitError};
use crate::extract::extract;
use crate::language::TargetLanguage;
use crate::output::{OutputWriter, OutputWriterFactory};
use crate::scan::{scan_directory, SubtitleFile};
use crate::subtitle::{ConversionOutput, SubtitleFormat};

/// Summary of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    /// True when nothing usable was found and an empty file was written
    pub empty: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: String,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Convert(SubtitleFormat),
    Extract(TargetLanguage),
}

pub struct Workflow {
    config: Config,
    writer: Box<dyn OutputWriter>,
    show_progress: bool,
}

impl Workflow {
    pub fn new(config: Config) -> Self {
        let writer = OutputWriterFactory::create_writer(config.output.conflict);
        Self::with_writer(config, writer)
    }

    pub fn with_writer(config: Config, writer: Box<dyn OutputWriter>) -> Self {
        Self {
            config,
            writer,
            show_progress: false,
        }
    }

    /// Show a progress bar during directory runs
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Convert one file. The source format is taken from the file extension
    /// unless `from` is given.
    pub async fn convert_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        from: Option<SubtitleFormat>,
        to: SubtitleFormat,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        info!("Converting {} to {}", input_path.display(), to);

        let from = match from {
            Some(format) => format,
            None => SubtitleFormat::from_path(input_path)?,
        };
        let (file_name, content) = self.read_input(input_path).await?;
        let output = convert(
            &file_name,
            &content,
            from,
            to,
            &ConvertOptions::from(&self.config.convert),
        )?;

        let directory = self.output_directory(input_path, output_dir)?;
        self.write_output(input_path, &directory, output).await
    }

    /// Keep only `keep` lines of one bilingual file
    pub async fn extract_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        keep: TargetLanguage,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        info!("Extracting {} lines from {}", keep, input_path.display());

        let file_type = SubtitleFormat::from_path(input_path)?;
        let (file_name, content) = self.read_input(input_path).await?;
        let output = extract(&file_name, &content, file_type, keep)?;

        let directory = self.output_directory(input_path, output_dir)?;
        self.write_output(input_path, &directory, output).await
    }

    /// Convert every subtitle file in a directory. Files already in the
    /// target format are skipped.
    pub async fn convert_directory<P: AsRef<Path>>(
        &self,
        input_dir: P,
        to: SubtitleFormat,
        output_dir: Option<&Path>,
        recursive: bool,
    ) -> Result<BatchReport> {
        self.process_directory(input_dir.as_ref(), Operation::Convert(to), output_dir, recursive)
            .await
    }

    /// Run extraction over every subtitle file in a directory
    pub async fn extract_directory<P: AsRef<Path>>(
        &self,
        input_dir: P,
        keep: TargetLanguage,
        output_dir: Option<&Path>,
        recursive: bool,
    ) -> Result<BatchReport> {
        self.process_directory(input_dir.as_ref(), Operation::Extract(keep), output_dir, recursive)
            .await
    }

    async fn process_directory(
        &self,
        input_dir: &Path,
        operation: Operation,
        output_dir: Option<&Path>,
        recursive: bool,
    ) -> Result<BatchReport> {
        info!("Processing directory: {}", input_dir.display());

        let files = scan_directory(input_dir, recursive)?;
        info!("Found {} subtitle files to process", files.len());

        let progress = self.progress_bar(files.len() as u64);
        let mut report = BatchReport::default();

        for file in files {
            progress.set_message(file.file_name.clone());

            if let Operation::Convert(to) = operation {
                if file.format == to {
                    info!("Skipping {}: already {}", file.path.display(), to);
                    report.skipped.push(file.path);
                    progress.inc(1);
                    continue;
                }
            }

            let target_dir = output_dir.map(|dir| mirror_directory(input_dir, dir, &file));
            let result = match operation {
                Operation::Convert(to) => {
                    self.convert_file(&file.path, Some(file.format), to, target_dir.as_deref())
                        .await
                }
                Operation::Extract(keep) => {
                    self.extract_file(&file.path, keep, target_dir.as_deref()).await
                }
            };

            match result {
                Ok(output) => {
                    info!("Successfully processed: {}", file.path.display());
                    let empty = fs::metadata(&output).await.map(|m| m.len() == 0).unwrap_or(false);
                    report.processed.push(ProcessedFile {
                        input: file.path,
                        output,
                        empty,
                    });
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", file.path.display(), e);
                    report.failed.push(FailedFile {
                        input: file.path,
                        error: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Directory run finished: {} processed, {} skipped, {} failed",
            report.processed.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(report)
    }

    async fn read_input(&self, input_path: &Path) -> Result<(String, String)> {
        if !fs::try_exists(input_path).await? {
            return Err(SubkitError::FileNotFound(input_path.display().to_string()));
        }

        let file_name = input_path
            .file_name()
            .ok_or_else(|| SubkitError::Config("Invalid input filename".to_string()))?
            .to_string_lossy()
            .into_owned();
        let content = fs::read_to_string(input_path).await?;

        Ok((file_name, content))
    }

    /// Explicit directory, then the configured one, then the input's own
    fn output_directory(&self, input_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = output_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.config.output.directory {
            return Ok(dir.clone());
        }

        input_path
            .parent()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| SubkitError::Config("Cannot determine output directory".to_string()))
    }

    async fn write_output(
        &self,
        input_path: &Path,
        directory: &Path,
        output: ConversionOutput,
    ) -> Result<PathBuf> {
        if output.output_content.is_empty() {
            warn!("No usable entries in {}; output will be empty", input_path.display());
        }

        self.writer
            .write(directory, &output.output_file_name, &output.output_content)
            .await
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

/// Place the output of `file` under `output_dir`, keeping its path relative
/// to `input_dir` so recursive runs do not flatten subdirectories.
fn mirror_directory(input_dir: &Path, output_dir: &Path, file: &SubtitleFile) -> PathBuf {
    file.path
        .parent()
        .and_then(|parent| parent.strip_prefix(input_dir).ok())
        .map(|relative| output_dir.join(relative))
        .unwrap_or_else(|| output_dir.to_path_buf())
}
