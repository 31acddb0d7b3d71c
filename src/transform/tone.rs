use regex::Regex;
use std::sync::LazyLock;

use crate::features::count_pictographs;
use crate::platform::PlatformRules;
use crate::transform::{strip_pictographs, StageNote, StageOutcome};

static RE_REPEATED_BANG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!{2,}").unwrap());
static RE_SLANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:gonna|wanna|lit|dope|omg|lol)\b").unwrap());
static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Which tone adjustments a free-form tone label asks for. Both may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToneStyle {
    pub formal: bool,
    pub lively: bool,
}

impl ToneStyle {
    pub fn from_label(tone: &str) -> Self {
        let tone = tone.to_lowercase();
        Self {
            formal: tone.contains("professional") || tone.contains("formal"),
            lively: ["energetic", "playful", "friendly"]
                .iter()
                .any(|needle| tone.contains(needle)),
        }
    }
}

pub fn normalize_tone(text: &str, tone: &str, rules: &PlatformRules) -> StageOutcome {
    let style = ToneStyle::from_label(tone);
    let mut result = text.to_string();
    let mut notes = Vec::new();

    if style.formal {
        let stripped = strip_pictographs(&result);
        let calmed = RE_REPEATED_BANG.replace_all(&stripped, "!");
        let cleaned = RE_SLANG.replace_all(&calmed, "");
        let tidied = RE_SPACE_RUN.replace_all(&cleaned, " ").trim().to_string();
        if tidied != result {
            notes.push(StageNote::new(
                "Adjusted wording for a professional tone.",
                "Removed emoji, slang, and repeated exclamation marks.",
            ));
            result = tidied;
        }
    }

    if style.lively && !result.contains('!') && count_pictographs(&result) == 0 {
        let accent = if rules.key == "LinkedIn" { "!" } else { " ✨" };
        result.push_str(accent);
        notes.push(StageNote::new(
            "Added energy to match the requested tone.",
            format!("Appended \"{}\".", accent.trim()),
        ));
    }

    StageOutcome {
        text: result,
        notes,
    }
}
