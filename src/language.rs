//! Heuristic Chinese / Japanese line classification.
//!
//! This is a fast character-set check tuned for bilingual ZH/JA subtitles,
//! not a language identification model. Short or mixed-script lines can be
//! misclassified; the extraction policy compensates for the common
//! two-line pairing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SubkitError};

/// Label assigned to one line of subtitle text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Zh,
    Ja,
    Unknown,
}

/// Language a caller wants to keep when extracting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetLanguage {
    Zh,
    Ja,
}

impl Language {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Zh => "ZH",
            Self::Ja => "JA",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl TargetLanguage {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Zh => "ZH",
            Self::Ja => "JA",
        }
    }
}

impl From<TargetLanguage> for Language {
    fn from(target: TargetLanguage) -> Self {
        match target {
            TargetLanguage::Zh => Language::Zh,
            TargetLanguage::Ja => Language::Ja,
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = SubkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "ja" => Ok(Self::Ja),
            _ => Err(SubkitError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Hiragana, katakana, katakana phonetic extensions, half-width katakana
const KANA_RANGES: &[(char, char)] = &[
    ('\u{3040}', '\u{309F}'),
    ('\u{30A0}', '\u{30FF}'),
    ('\u{31F0}', '\u{31FF}'),
    ('\u{FF65}', '\u{FF9F}'),
];

const JAPANESE_PUNCTUATION: &[char] = &['、', '。', '「', '」', '『', '』', '・', '〜', 'ー'];

static JAPANESE_ENDING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:です|ます|だった|だ|ない|たい|よう|から|まで|って|では|じゃ|か|ね|よ)[\s!?！？。…〜～]*$",
    )
    .expect("valid Japanese ending regex")
});

/// Full-width and CJK-block punctuation only; typographic quotes, dashes and
/// ellipses are shared with English text.
const CHINESE_PUNCTUATION: &[char] = &[
    '，', '！', '？', '；', '：', '（', '）', '【', '】', '《', '》', '〈', '〉', '〔', '〕',
];

const CHINESE_FUNCTION_WORDS: &[char] = &[
    '的', '了', '吗', '呢', '吧', '啊', '呀', '嘛', '哦', '么', '们', '这', '那', '哪', '着',
    '很', '都', '也', '就', '把', '被', '给', '跟', '是', '我', '你', '他', '她', '它', '没',
    '不',
];

/// Simplified forms whose Japanese counterpart is written differently
/// (乐/楽, 说/説, 爱/愛 ...), so their presence rules out Japanese kanji.
const SIMPLIFIED_ONLY: &[char] = &[
    '们', '这', '说', '时', '对', '为', '个', '还', '进', '过', '发', '动', '开', '关', '见',
    '长', '门', '问', '间', '听', '让', '认', '识', '语', '话', '请', '谁', '边', '样', '经',
    '头', '买', '卖', '东', '车', '电', '马', '鸟', '鱼', '欢', '爱', '觉', '应', '该', '现',
    '从', '给', '难', '钱', '飞', '战', '乐', '汉', '么', '岁', '产', '业', '书', '亲', '儿',
    '节', '结', '级', '红', '师', '帮', '谢', '备', '虽', '员', '气', '实', '丽', '爷', '娘',
];

fn is_kana(c: char) -> bool {
    KANA_RANGES.iter().any(|&(lo, hi)| lo <= c && c <= hi)
}

fn has_japanese_signal(text: &str) -> bool {
    text.chars().any(|c| is_kana(c) || JAPANESE_PUNCTUATION.contains(&c))
        || JAPANESE_ENDING_REGEX.is_match(text)
}

fn has_chinese_signal(text: &str) -> bool {
    text.chars().any(|c| {
        CHINESE_PUNCTUATION.contains(&c)
            || CHINESE_FUNCTION_WORDS.contains(&c)
            || SIMPLIFIED_ONLY.contains(&c)
    })
}

/// Classify one line of text. Japanese signals are checked before Chinese
/// ones; the first match wins.
pub fn classify(text: &str) -> Language {
    let text = text.trim();
    if text.is_empty() {
        return Language::Unknown;
    }

    if has_japanese_signal(text) {
        Language::Ja
    } else if has_chinese_signal(text) {
        Language::Zh
    } else {
        Language::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_unknown() {
        assert_eq!(classify(""), Language::Unknown);
        assert_eq!(classify("   \t"), Language::Unknown);
    }

    #[test]
    fn test_kana_is_japanese() {
        assert_eq!(classify("おねだりにしてみてほしいの"), Language::Ja);
        assert_eq!(classify("ゴーって言ってます"), Language::Ja);
        assert_eq!(classify("ｶﾀｶﾅ"), Language::Ja);
        assert_eq!(classify("こんにちは"), Language::Ja);
    }

    #[test]
    fn test_japanese_punctuation_wins_over_chinese_characters() {
        assert_eq!(classify("「東京」"), Language::Ja);
        assert_eq!(classify("我们走。"), Language::Ja);
    }

    #[test]
    fn test_chinese_signals() {
        assert_eq!(classify("想让我撒娇试试看"), Language::Zh);
        assert_eq!(classify("说要开始了"), Language::Zh);
        assert_eq!(classify("你好"), Language::Zh);
        assert_eq!(classify("快乐"), Language::Zh);
        assert_eq!(classify("真的？"), Language::Zh);
    }

    #[test]
    fn test_unknown_without_signals() {
        assert_eq!(classify("Hello world"), Language::Unknown);
        assert_eq!(classify("大丈夫"), Language::Unknown);
        assert_eq!(classify("12345"), Language::Unknown);
    }

    #[test]
    fn test_typographic_punctuation_is_not_chinese() {
        assert_eq!(classify("Don’t go"), Language::Unknown);
        assert_eq!(classify("Wait…"), Language::Unknown);
        assert_eq!(classify("“Hello” — she said"), Language::Unknown);
        assert_eq!(classify("Really？"), Language::Zh);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for line in ["こんにちは", "你好", "大丈夫", "", "Hello"] {
            assert_eq!(classify(line), classify(line));
        }
    }

    #[test]
    fn test_target_language_from_str() {
        assert_eq!("zh".parse::<TargetLanguage>().unwrap(), TargetLanguage::Zh);
        assert_eq!(" JA ".parse::<TargetLanguage>().unwrap(), TargetLanguage::Ja);
        assert!(matches!(
            "en".parse::<TargetLanguage>(),
            Err(SubkitError::UnsupportedLanguage(_))
        ));
    }
}
