use regex::Regex;
use std::sync::LazyLock;

use crate::features::{char_len, has_cta};
use crate::platform::PlatformRules;
use crate::transform::{insert_cta, truncate_chars, StageNote, StageOutcome};

pub const LENGTH_FILLER: &str = " • Why it matters: real impact in days.";
const BULLET: char = '•';

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static RE_SHORT_TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+\w{1,3}\b").unwrap());
static RE_TAIL_PHRASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;:]-?\s*\w+$").unwrap());

/// Fits the text into `[min_chars, max_chars]`, minus `reserved` characters
/// held back for the hashtag suffix appended afterwards.
///
/// Extension pads with a filler clause and a CTA and then caps at the
/// maximum; that cap can cut back into what was just added, so the minimum
/// is not guaranteed.
pub fn enforce_length(text: &str, rules: &PlatformRules, reserved: usize) -> StageOutcome {
    let max = rules.max_chars.saturating_sub(reserved);
    let min = rules.min_chars.saturating_sub(reserved);
    let before = char_len(text);
    let trimmed = text.trim();
    let length = char_len(trimmed);

    let result = if length > max {
        compress_to_fit(trimmed, rules, max)
    } else if length < min {
        extend_to_minimum(trimmed, rules, max)
    } else {
        trimmed.to_string()
    };

    let after = char_len(&result);
    if after == before {
        return StageOutcome::unchanged(result);
    }

    let note = if after < before {
        StageNote::new(
            "Compressed copy to fit platform length window.",
            format!("Trimmed from {} to {} chars.", before, after),
        )
    } else {
        StageNote::new(
            "Expanded copy to meet minimum platform length.",
            format!("Extended from {} to {} chars.", before, after),
        )
    };
    StageOutcome::changed(result, note)
}

fn compress_to_fit(text: &str, rules: &PlatformRules, max: usize) -> String {
    let (body, tail) = split_cta_tail(text, rules);
    let room = max.saturating_sub(char_len(tail));
    let mut fitted = compress(body, room);
    fitted.push_str(tail);

    if has_cta(text) && !has_cta(&fitted) {
        let suffix = char_len(rules.cta_separator()) + char_len(rules.primary_cta());
        fitted = insert_cta(&compress(&fitted, max.saturating_sub(suffix)), rules);
    }

    fitted.trim().to_string()
}

fn compress(text: &str, max: usize) -> String {
    let collapsed = RE_WHITESPACE.replace_all(text, " ");
    let without_asides = RE_PARENTHETICAL.replace_all(&collapsed, "");
    let mut shortened = RE_SHORT_TRAILER
        .replace_all(&without_asides, "${1}")
        .into_owned();

    while char_len(&shortened) > max {
        let shaved = RE_TAIL_PHRASE.replace(&shortened, "").into_owned();
        if shaved.len() == shortened.len() {
            shortened = truncate_chars(&shortened, max).to_string();
            break;
        }
        shortened = shaved;
    }

    shortened.trim().to_string()
}

fn extend_to_minimum(text: &str, rules: &PlatformRules, max: usize) -> String {
    let mut extended = text.to_string();
    if !extended.contains(BULLET) {
        extended.push_str(LENGTH_FILLER);
    }
    if !has_cta(&extended) {
        extended = insert_cta(&extended, rules);
    }
    truncate_chars(&extended, max).trim().to_string()
}

/// Splits off a CTA variant appended at the very end, separator included.
fn split_cta_tail<'a>(text: &'a str, rules: &PlatformRules) -> (&'a str, &'a str) {
    for variant in &rules.cta_variants {
        for separator in ["\n", " — "] {
            let suffix = format!("{}{}", separator, variant);
            if let Some(body) = text.strip_suffix(suffix.as_str()) {
                return (body, &text[body.len()..]);
            }
        }
    }
    (text, "")
}
