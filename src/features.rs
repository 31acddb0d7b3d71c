use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const POWER_WORDS: [&str; 10] = [
    "free",
    "save",
    "new",
    "limited",
    "boost",
    "proven",
    "effortless",
    "premium",
    "exclusive",
    "guarantee",
];

pub(crate) static RE_PICTOGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Extended_Pictographic}").unwrap());
pub(crate) static RE_HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{N}_]+").unwrap());
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\p{L}\p{N}'-]+\b").unwrap());
static RE_NUMERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").unwrap());
static RE_POWER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", POWER_WORDS.join("|"))).unwrap()
});
// Imperative CTA phrases. Every CTA variant in the platform catalog matches,
// and bare verbs ("get results") do not.
static RE_CTA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:click (?:here|now|below|the link)|visit (?:us|our|the|now)|buy (?:now|today|it)|shop (?:now|today|the)|learn more|discover (?:more|how)|try (?:now|it|today|free)|get (?:started|yours|it now|the full story)|download (?:now|today|free|the)|sign up|subscribe|follow (?:us|for)|share (?:this|with)|read more|watch now|join (?:now|us|today)|tap to|see how|see the results)\b",
    )
    .unwrap()
});

/// Numeric signals derived from a post, used by the scorer and echoed in
/// the output for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub length: usize,
    pub emojis: usize,
    pub hashtags: usize,
    pub ctas: usize,
    pub questions: usize,
    pub numerals: usize,
    pub power_words: usize,
    pub reading_grade: u8,
}

impl FeatureSet {
    pub fn has_cta(&self) -> bool {
        self.ctas > 0
    }
}

pub fn extract_features(text: &str) -> FeatureSet {
    FeatureSet {
        length: char_len(text),
        emojis: count_pictographs(text),
        hashtags: count_hashtags(text),
        ctas: usize::from(has_cta(text)),
        questions: text.matches('?').count(),
        numerals: RE_NUMERAL.find_iter(text).count(),
        power_words: RE_POWER_WORD.find_iter(text).count(),
        reading_grade: reading_grade(text),
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn is_pictograph(ch: char) -> bool {
    let mut buffer = [0u8; 4];
    RE_PICTOGRAPH.is_match(ch.encode_utf8(&mut buffer))
}

pub fn count_pictographs(text: &str) -> usize {
    RE_PICTOGRAPH.find_iter(text).count()
}

pub fn count_hashtags(text: &str) -> usize {
    RE_HASHTAG.find_iter(text).count()
}

pub fn has_cta(text: &str) -> bool {
    RE_CTA.is_match(text)
}

/// Coarse complexity band from the average characters per word. This is a
/// word-length proxy, not a syllable-based readability formula.
pub fn reading_grade(text: &str) -> u8 {
    let mut words = 0usize;
    let mut letters = 0usize;
    for word in RE_WORD.find_iter(text) {
        words += 1;
        letters += char_len(word.as_str());
    }

    let avg_len = if words == 0 {
        0.0
    } else {
        letters as f64 / words as f64
    };

    if avg_len <= 4.5 {
        6
    } else if avg_len <= 5.0 {
        7
    } else if avg_len <= 5.5 {
        8
    } else if avg_len <= 6.0 {
        9
    } else if avg_len <= 6.5 {
        10
    } else {
        11
    }
}
