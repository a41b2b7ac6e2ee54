use tracing::debug;

use crate::error::{Result, SubkitError};
use crate::subtitle::{
    group_lrc_entries, parse_lrc, parse_srt, render_srt, replace_extension, ConversionOutput,
    SrtBlock, SubtitleFormat,
};
use crate::timestamp::format_lrc_tag;

/// Timing parameters for LRC to SRT conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Display duration of the last block
    pub default_duration_ms: u64,
    /// Shortest duration any generated block may have
    pub min_duration_ms: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_duration_ms: 2000,
            min_duration_ms: 300,
        }
    }
}

/// Convert subtitle content between LRC and SRT.
///
/// The output file name is `file_name` with its extension replaced by the
/// target format. Converting a format to itself is an error.
pub fn convert(
    file_name: &str,
    content: &str,
    from: SubtitleFormat,
    to: SubtitleFormat,
    options: &ConvertOptions,
) -> Result<ConversionOutput> {
    let output_content = match (from, to) {
        (SubtitleFormat::Lrc, SubtitleFormat::Srt) => lrc_to_srt(content, options),
        (SubtitleFormat::Srt, SubtitleFormat::Lrc) => srt_to_lrc(content),
        _ => return Err(SubkitError::UnsupportedConversion { from, to }),
    };

    Ok(ConversionOutput {
        output_file_name: replace_extension(file_name, to),
        output_content,
    })
}

/// Build SRT blocks from LRC content.
///
/// Lines sharing a timestamp are merged into one block (identical lines
/// once). A block ends at the next timestamp, the last one after
/// `default_duration_ms`, and no block is shorter than `min_duration_ms`.
pub fn lrc_to_srt_blocks(content: &str, options: &ConvertOptions) -> Vec<SrtBlock> {
    let groups = group_lrc_entries(parse_lrc(content));
    debug!("Parsed {} distinct LRC timestamps", groups.len());

    let mut blocks = Vec::with_capacity(groups.len());

    for (i, group) in groups.iter().enumerate() {
        let start_ms = group.time_ms;
        let natural_end = groups
            .get(i + 1)
            .map(|next| next.time_ms)
            .unwrap_or(start_ms.saturating_add(options.default_duration_ms));
        let end_ms = natural_end.max(start_ms.saturating_add(options.min_duration_ms));

        let mut text_lines: Vec<String> = Vec::new();
        for text in &group.texts {
            let text = text.trim();
            if !text_lines.iter().any(|seen| seen == text) {
                text_lines.push(text.to_string());
            }
        }

        blocks.push(SrtBlock {
            index: i + 1,
            start_ms,
            end_ms,
            text_lines,
        });
    }

    blocks
}

pub fn lrc_to_srt(content: &str, options: &ConvertOptions) -> String {
    render_srt(&lrc_to_srt_blocks(content, options))
}

/// Turn every SRT block into one LRC line at its start time. Multi-line
/// text is joined with a space; end times are dropped.
pub fn srt_to_lrc(content: &str) -> String {
    let cues = parse_srt(content);
    debug!("Parsed {} SRT blocks", cues.len());

    cues.iter()
        .map(|cue| format!("{}{}", format_lrc_tag(cue.start_ms), cue.text_lines.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
