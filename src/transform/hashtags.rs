use regex::Regex;
use std::sync::LazyLock;

use crate::features::{char_len, count_hashtags, RE_HASHTAG};
use crate::platform::PlatformRules;
use crate::transform::{StageNote, StageOutcome};

static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagSplit {
    pub without: String,
    pub tags: Vec<String>,
}

/// Pulls every hashtag out of the text, keeping them in order of appearance.
/// The gaps left behind collapse to a single space.
pub fn split_hashtags(text: &str) -> HashtagSplit {
    let tags = RE_HASHTAG
        .find_iter(text)
        .map(|tag| tag.as_str().to_string())
        .collect();
    let removed = RE_HASHTAG.replace_all(text, "");
    let without = RE_SPACE_RUN.replace_all(&removed, " ").trim().to_string();
    HashtagSplit { without, tags }
}

/// Moves hashtags that surfaced in the body after a stage removed what
/// separated `#` from a word (`#🚀launch` -> `#launch`) onto `tags`.
pub fn absorb_hashtags(text: String, tags: &mut Vec<String>) -> String {
    let split = split_hashtags(&text);
    if split.tags.is_empty() {
        return text;
    }
    tags.extend(split.tags);
    split.without
}

/// Tags that will be re-attached to the post, decided from the extracted
/// tags and the platform range alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagPlan {
    pub tags: Vec<String>,
    pub dropped: usize,
    pub fallback_added: bool,
    /// The fallback tag was already present, so the minimum was left unmet.
    pub fallback_blocked: bool,
}

impl HashtagPlan {
    pub fn suffix(&self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            format!(" {}", self.tags.join(" "))
        }
    }

    pub fn suffix_len(&self) -> usize {
        char_len(&self.suffix())
    }
}

pub fn plan_hashtags(tags: &[String], rules: &PlatformRules) -> HashtagPlan {
    let mut kept: Vec<String> = tags.iter().take(rules.hashtags_max).cloned().collect();
    let dropped = tags.len() - kept.len();
    let mut fallback_added = false;
    let mut fallback_blocked = false;

    // One fallback at most: a tag that is already there is never duplicated.
    while kept.len() < rules.hashtags_min {
        if kept.contains(&rules.fallback_hashtag) {
            fallback_blocked = true;
            break;
        }
        kept.push(rules.fallback_hashtag.clone());
        fallback_added = true;
    }

    HashtagPlan {
        tags: kept,
        dropped,
        fallback_added,
        fallback_blocked,
    }
}

pub fn enforce_hashtags(text: &str, rules: &PlatformRules, tags: &[String]) -> StageOutcome {
    let plan = plan_hashtags(tags, rules);
    let joined = format!("{}{}", text.trim(), plan.suffix()).trim().to_string();

    let before = tags.len();
    let after = count_hashtags(&joined);
    if after == before {
        return StageOutcome::unchanged(joined);
    }

    StageOutcome::changed(
        joined,
        StageNote::new(
            "Normalized hashtags to platform range.",
            format!(
                "Hashtags: {} → {} (allowed {}–{}).",
                before, after, rules.hashtags_min, rules.hashtags_max
            ),
        ),
    )
}
