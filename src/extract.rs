use tracing::debug;

use crate::error::Result;
use crate::language::{classify, Language, TargetLanguage};
use crate::subtitle::{
    group_lrc_entries, parse_lrc, parse_srt, push_srt_block, ConversionOutput, SubtitleFormat,
};

/// Keep only the lines of `keep` from bilingual subtitle content.
///
/// The container format is preserved and so is the file name. Timing units
/// with nothing left are dropped; an input with no matching lines produces
/// empty content.
pub fn extract(
    file_name: &str,
    content: &str,
    file_type: SubtitleFormat,
    keep: TargetLanguage,
) -> Result<ConversionOutput> {
    let output_content = match file_type {
        SubtitleFormat::Lrc => extract_lrc(content, keep),
        SubtitleFormat::Srt => extract_srt(content, keep),
    };

    Ok(ConversionOutput {
        output_file_name: file_name.to_string(),
        output_content,
    })
}

/// Choose which of the lines sharing one timing unit belong to `keep`.
///
/// Chinese is only ever taken from lines positively classified as Chinese.
/// Japanese falls back to the non-Chinese lines when some line is Chinese
/// but none is recognizably Japanese, which covers the usual two-line
/// JA/ZH pairing where the Japanese line is written in kanji only.
pub fn select_lines<S: AsRef<str>>(lines: &[S], keep: TargetLanguage) -> Vec<String> {
    let labelled: Vec<(&str, Language)> = lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            (line, classify(line))
        })
        .collect();

    let wanted = Language::from(keep);
    let matched: Vec<String> = labelled
        .iter()
        .filter(|(_, label)| *label == wanted)
        .map(|(line, _)| line.to_string())
        .collect();

    if !matched.is_empty() || keep == TargetLanguage::Zh {
        return matched;
    }

    // A two-line pair with exactly one Chinese line yields the other line;
    // larger groups yield every non-Chinese line. Both reduce to this.
    if labelled.iter().any(|(_, label)| *label == Language::Zh) {
        return labelled
            .iter()
            .filter(|(_, label)| *label != Language::Zh)
            .map(|(line, _)| line.to_string())
            .collect();
    }

    Vec::new()
}

/// LRC extraction: one output line per timestamp, written with the first
/// tag seen for that timestamp.
///
/// When more than one line at a timestamp is retained they are merged into
/// that single output line, joined with a space, rather than dropped.
pub fn extract_lrc(content: &str, keep: TargetLanguage) -> String {
    let groups = group_lrc_entries(parse_lrc(content));
    debug!("Extracting {} from {} LRC timestamps", keep, groups.len());

    let mut lines = Vec::new();
    for group in &groups {
        let selected = select_lines(&group.texts, keep);
        if selected.is_empty() {
            continue;
        }
        lines.push(format!("{}{}", group.tag, selected.join(" ")));
    }

    debug!("Kept {} of {} LRC timestamps", lines.len(), groups.len());
    lines.join("\n")
}

/// SRT extraction: surviving blocks are renumbered from 1 and keep their
/// original timing line.
pub fn extract_srt(content: &str, keep: TargetLanguage) -> String {
    let cues = parse_srt(content);
    debug!("Extracting {} from {} SRT blocks", keep, cues.len());

    let mut out = String::new();
    let mut index = 0;

    for cue in &cues {
        let selected = select_lines(&cue.text_lines, keep);
        if selected.is_empty() {
            continue;
        }
        index += 1;
        push_srt_block(&mut out, index, &cue.timing_line, &selected);
    }

    debug!("Kept {} of {} SRT blocks", index, cues.len());
    out
}
