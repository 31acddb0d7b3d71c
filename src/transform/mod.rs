//! Text rewrite stages. Each stage is a pure function of the working text and
//! the resolved platform rules, and reports what it changed as notes.

pub mod cta;
pub mod emoji;
pub mod hashtags;
pub mod hook;
pub mod length;
pub mod tone;

pub use cta::{ensure_cta, insert_cta};
pub use emoji::{limit_emojis, strip_pictographs};
pub use hashtags::{
    absorb_hashtags, enforce_hashtags, plan_hashtags, split_hashtags, HashtagPlan, HashtagSplit,
};
pub use hook::{ensure_hook, HOOK_SENTENCE};
pub use length::{enforce_length, LENGTH_FILLER};
pub use tone::{normalize_tone, ToneStyle};

/// One change made by a stage: why it was made and what exactly changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageNote {
    pub reason: String,
    pub adjustment: String,
}

impl StageNote {
    pub fn new(reason: impl Into<String>, adjustment: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            adjustment: adjustment.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub text: String,
    pub notes: Vec<StageNote>,
}

impl StageOutcome {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notes: Vec::new(),
        }
    }

    pub fn changed(text: impl Into<String>, note: StageNote) -> Self {
        Self {
            text: text.into(),
            notes: vec![note],
        }
    }

    pub fn is_changed(&self) -> bool {
        !self.notes.is_empty()
    }
}

pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
