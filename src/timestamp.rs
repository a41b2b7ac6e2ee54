//! Millisecond timestamps and their LRC / SRT text encodings.

use once_cell::sync::Lazy;
use regex::Regex;

/// Milliseconds since the start of the media.
pub type Timestamp = u64;

/// Matches one `[mm:ss]`, `[mm:ss.x]`, `[mm:ss.xx]` or `[mm:ss.xxx]` tag.
pub(crate) static LRC_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{2,}):(\d{2})(?:\.(\d{1,3}))?\]").expect("valid LRC tag regex")
});

static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})$").expect("valid SRT timestamp regex")
});

/// Parse a single LRC time tag such as `[01:02.34]`.
///
/// The fraction is scaled by its width: one digit is tenths, two digits are
/// hundredths and three digits are milliseconds. Returns `None` when the
/// tag is not a time tag (metadata tags like `[ti:Title]` included).
pub fn parse_lrc_tag(tag: &str) -> Option<Timestamp> {
    let caps = LRC_TAG_REGEX.captures(tag.trim())?;
    lrc_captures_to_ms(&caps)
}

pub(crate) fn lrc_captures_to_ms(caps: &regex::Captures<'_>) -> Option<Timestamp> {
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
    let fraction = match caps.get(3) {
        Some(m) => {
            let digits = m.as_str();
            let value: u64 = digits.parse().ok()?;
            match digits.len() {
                1 => value * 100,
                2 => value * 10,
                _ => value,
            }
        }
        None => 0,
    };

    // out-of-range minutes make the tag malformed, not fatal
    minutes
        .checked_mul(60_000)?
        .checked_add(seconds * 1_000)?
        .checked_add(fraction)
}

/// Format milliseconds as an LRC tag `[MM:SS.CC]`.
///
/// Minutes never roll over into hours. Hundredths are truncated and clamped
/// to 99 so they cannot carry into the seconds field.
pub fn format_lrc_tag(ms: Timestamp) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let hundredths = ((ms % 1_000) / 10).min(99);

    format!("[{:02}:{:02}.{:02}]", minutes, seconds, hundredths)
}

/// Parse an SRT timestamp `HH:MM:SS,mmm`; anything else yields 0.
pub fn parse_srt_timestamp(value: &str) -> Timestamp {
    let Some(caps) = SRT_TIMESTAMP_REGEX.captures(value.trim()) else {
        return 0;
    };

    let field = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    field(1) * 3_600_000 + field(2) * 60_000 + field(3) * 1_000 + field(4)
}

/// Format milliseconds as an SRT timestamp `HH:MM:SS,mmm` with unbounded hours.
pub fn format_srt_timestamp(ms: Timestamp) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lrc_tag_fraction_widths() {
        assert_eq!(parse_lrc_tag("[00:01.5]"), Some(1_500));
        assert_eq!(parse_lrc_tag("[00:01.05]"), Some(1_050));
        assert_eq!(parse_lrc_tag("[00:01.005]"), Some(1_005));
        assert_eq!(parse_lrc_tag("[02:03]"), Some(123_000));
        assert_eq!(parse_lrc_tag("[120:00.00]"), Some(7_200_000));
    }

    #[test]
    fn test_parse_lrc_tag_rejects_metadata() {
        assert_eq!(parse_lrc_tag("[ti:Some Title]"), None);
        assert_eq!(parse_lrc_tag("[0:01.00]"), None);
        assert_eq!(parse_lrc_tag("00:01.00"), None);
    }

    #[test]
    fn test_parse_lrc_tag_rejects_out_of_range_minutes() {
        assert_eq!(parse_lrc_tag("[999999999999999999:00.00]"), None);
        assert_eq!(parse_lrc_tag("[99999999999999999999999:00.00]"), None);
        assert_eq!(
            parse_lrc_tag("[307445734561825:00.00]"),
            Some(307_445_734_561_825 * 60_000)
        );
    }

    #[test]
    fn test_format_lrc_tag() {
        assert_eq!(format_lrc_tag(0), "[00:00.00]");
        assert_eq!(format_lrc_tag(53_620), "[00:53.62]");
        assert_eq!(format_lrc_tag(61_005), "[01:01.00]");
        assert_eq!(format_lrc_tag(59_999), "[00:59.99]");
        // no hour rollover
        assert_eq!(format_lrc_tag(3_723_450), "[62:03.45]");
    }

    #[test]
    fn test_lrc_round_trip_truncates_to_centiseconds() {
        for ms in (0..3_600_000u64).step_by(7) {
            let parsed = parse_lrc_tag(&format_lrc_tag(ms)).unwrap();
            assert_eq!(parsed, ms - ms % 10, "round trip of {}", ms);
        }
    }

    #[test]
    fn test_parse_srt_timestamp() {
        assert_eq!(parse_srt_timestamp("00:00:53,620"), 53_620);
        assert_eq!(parse_srt_timestamp("01:23:45,678"), 5_025_678);
        assert_eq!(parse_srt_timestamp(" 00:00:01,000 "), 1_000);
    }

    #[test]
    fn test_parse_srt_timestamp_defaults_to_zero() {
        assert_eq!(parse_srt_timestamp("0:00:01,000"), 0);
        assert_eq!(parse_srt_timestamp("00:00:01.000"), 0);
        assert_eq!(parse_srt_timestamp("garbage"), 0);
        assert_eq!(parse_srt_timestamp(""), 0);
    }

    #[test]
    fn test_format_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(65_123), "00:01:05,123");
        assert_eq!(format_srt_timestamp(3_661_500), "01:01:01,500");
        assert_eq!(format_srt_timestamp(360_000_000), "100:00:00,000");
    }

    #[test]
    fn test_srt_round_trip() {
        for ms in (0..3_600_000u64).step_by(10) {
            assert_eq!(parse_srt_timestamp(&format_srt_timestamp(ms)), ms);
        }
    }
}
