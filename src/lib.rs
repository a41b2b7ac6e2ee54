//! subkit - LRC/SRT Subtitle Toolbox
//!
//! Pure text conversion between LRC and SRT, heuristic Chinese/Japanese line
//! classification, and extraction of one language from bilingual subtitles,
//! plus the file workflow and CLI built around them.

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod extract;
pub mod language;
pub mod output;
pub mod scan;
pub mod subtitle;
pub mod timestamp;
pub mod workflow;

pub use convert::{convert, ConvertOptions};
pub use extract::extract;
pub use language::{classify, Language, TargetLanguage};
pub use subtitle::{ConversionOutput, SubtitleFormat};
