use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::language::TargetLanguage;
use crate::subtitle::SubtitleFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a subtitle file between LRC and SRT
    Convert {
        /// Input subtitle file
        #[arg(short, long)]
        input: PathBuf,

        /// Target format (lrc or srt)
        #[arg(short, long)]
        to: SubtitleFormat,

        /// Source format; detected from the file extension when omitted
        #[arg(long)]
        from: Option<SubtitleFormat>,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Duration of the last block in milliseconds (LRC to SRT)
        #[arg(long)]
        default_duration_ms: Option<u64>,
    },

    /// Keep only Chinese or Japanese lines of a bilingual subtitle file
    Extract {
        /// Input subtitle file
        #[arg(short, long)]
        input: PathBuf,

        /// Language to keep (zh or ja); falls back to the configured one
        #[arg(short, long)]
        keep: Option<TargetLanguage>,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Convert every subtitle file in a directory
    BatchConvert {
        /// Input directory containing subtitle files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Target format (lrc or srt)
        #[arg(short, long)]
        to: SubtitleFormat,

        /// Output directory for converted files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Include subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run extraction over every subtitle file in a directory
    BatchExtract {
        /// Input directory containing subtitle files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Language to keep (zh or ja); falls back to the configured one
        #[arg(short, long)]
        keep: Option<TargetLanguage>,

        /// Output directory for extracted files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Include subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the language label of each given line
    Classify {
        /// Lines of text to classify
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "subkit.toml")]
        output: PathBuf,
    },
}
