use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::normalize_line_endings;
use crate::timestamp::{format_srt_timestamp, parse_srt_timestamp, Timestamp};

static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})")
        .expect("valid SRT timing regex")
});

static INDEX_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid SRT index regex"));

static BLOCK_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid SRT block separator regex"));

/// A block read from SRT content. The timing line is kept verbatim so that
/// extraction can write it back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtCue {
    pub timing_line: String,
    pub start_ms: Timestamp,
    pub end_ms: Timestamp,
    pub text_lines: Vec<String>,
}

/// A block to be written as SRT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtBlock {
    pub index: usize,
    pub start_ms: Timestamp,
    pub end_ms: Timestamp,
    pub text_lines: Vec<String>,
}

impl SrtBlock {
    pub fn timing_line(&self) -> String {
        format!(
            "{} --> {}",
            format_srt_timestamp(self.start_ms),
            format_srt_timestamp(self.end_ms)
        )
    }
}

/// Split SRT content into cues.
///
/// A block's timing line is either its first line or, when the first line
/// is a bare index, its second line. Blocks without a recognizable timing
/// line or without any text are skipped.
pub fn parse_srt(content: &str) -> Vec<SrtCue> {
    let content = normalize_line_endings(content);
    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }

    let mut cues = Vec::new();

    for block in BLOCK_SEPARATOR_REGEX.split(content) {
        let lines: Vec<&str> = block.lines().map(str::trim).collect();

        let timing_pos = if lines.first().is_some_and(|l| TIMING_LINE_REGEX.is_match(l)) {
            0
        } else if lines.first().is_some_and(|l| INDEX_LINE_REGEX.is_match(l))
            && lines.get(1).is_some_and(|l| TIMING_LINE_REGEX.is_match(l))
        {
            1
        } else {
            trace!("Skipping malformed SRT block: {:?}", block);
            continue;
        };

        let timing_line = lines[timing_pos];
        let Some(caps) = TIMING_LINE_REGEX.captures(timing_line) else {
            continue;
        };
        let start_ms = parse_srt_timestamp(&caps[1]);
        let end_ms = parse_srt_timestamp(&caps[2]);

        let text_lines: Vec<String> = lines[timing_pos + 1..]
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();

        if text_lines.is_empty() {
            trace!("Skipping SRT block without text at {}", timing_line);
            continue;
        }

        cues.push(SrtCue {
            timing_line: timing_line.to_string(),
            start_ms,
            end_ms,
            text_lines,
        });
    }

    cues
}

/// Append one numbered block to `out`, separated from the previous one by a
/// blank line.
pub fn push_srt_block(out: &mut String, index: usize, timing_line: &str, text_lines: &[String]) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("{}\n{}\n{}\n", index, timing_line, text_lines.join("\n")));
}

/// Render blocks as SRT text
pub fn render_srt(blocks: &[SrtBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        push_srt_block(&mut out, block.index, &block.timing_line(), &block.text_lines);
    }
    out
}
