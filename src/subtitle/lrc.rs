use std::collections::HashMap;
use tracing::trace;

use super::normalize_line_endings;
use crate::timestamp::{lrc_captures_to_ms, Timestamp, LRC_TAG_REGEX};

/// One timestamp-to-text association taken from an LRC line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcEntry {
    pub time_ms: Timestamp,
    /// The tag exactly as written in the source, e.g. `[00:12.3]`
    pub tag: String,
    pub text: String,
}

/// All entries sharing one timestamp, in the order they appeared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcGroup {
    pub time_ms: Timestamp,
    /// First raw tag seen for this timestamp
    pub tag: String,
    pub texts: Vec<String>,
}

/// Parse LRC content into entries.
///
/// A line carrying several time tags yields one entry per tag. Lines without
/// a valid time tag (metadata such as `[ti:...]`) and lines whose text is
/// empty once tags are stripped are skipped.
pub fn parse_lrc(content: &str) -> Vec<LrcEntry> {
    let content = normalize_line_endings(content);
    let mut entries = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tags: Vec<(Timestamp, String)> = LRC_TAG_REGEX
            .captures_iter(line)
            .filter_map(|caps| {
                let raw = caps.get(0)?.as_str().to_string();
                lrc_captures_to_ms(&caps).map(|ms| (ms, raw))
            })
            .collect();

        if tags.is_empty() {
            trace!("Skipping LRC line without time tag: {}", line);
            continue;
        }

        let text = LRC_TAG_REGEX.replace_all(line, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        for (time_ms, tag) in tags {
            entries.push(LrcEntry {
                time_ms,
                tag,
                text: text.to_string(),
            });
        }
    }

    entries
}

/// Group entries by exact timestamp, ordered by ascending time.
pub fn group_lrc_entries(entries: Vec<LrcEntry>) -> Vec<LrcGroup> {
    let mut positions: HashMap<Timestamp, usize> = HashMap::new();
    let mut groups: Vec<LrcGroup> = Vec::new();

    for entry in entries {
        match positions.get(&entry.time_ms) {
            Some(&pos) => groups[pos].texts.push(entry.text),
            None => {
                positions.insert(entry.time_ms, groups.len());
                groups.push(LrcGroup {
                    time_ms: entry.time_ms,
                    tag: entry.tag,
                    texts: vec![entry.text],
                });
            }
        }
    }

    groups.sort_by_key(|group| group.time_ms);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lrc_basic() {
        let entries = parse_lrc("[00:01.00]first\r\n\r\n[00:02.50]second\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time_ms, 1_000);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[1].time_ms, 2_500);
        assert_eq!(entries[1].tag, "[00:02.50]");
    }

    #[test]
    fn test_parse_lrc_multiple_tags_replicate_text() {
        let entries = parse_lrc("[00:01.00][00:30.00] chorus ");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].time_ms, 1_000);
        assert_eq!(entries[1].time_ms, 30_000);
        assert!(entries.iter().all(|e| e.text == "chorus"));
    }

    #[test]
    fn test_parse_lrc_skips_metadata_and_empty_text() {
        let entries = parse_lrc("[ti:Title]\n[ar:Artist]\n[00:01.00]\n[00:02.00]   \n[00:03.00]kept");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "kept");
    }

    #[test]
    fn test_group_preserves_insertion_order_and_sorts_time() {
        let entries = parse_lrc("[00:05.00]late\n[00:01.0]a\n[00:01.00]b\n[00:01.000]c");
        let groups = group_lrc_entries(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].time_ms, 1_000);
        assert_eq!(groups[0].tag, "[00:01.0]");
        assert_eq!(groups[0].texts, vec!["a", "b", "c"]);
        assert_eq!(groups[1].texts, vec!["late"]);
    }
}
