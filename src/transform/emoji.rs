use crate::features::is_pictograph;
use crate::transform::{StageNote, StageOutcome};

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Keeps the first `max` pictographs and drops the rest. Everything that is
/// not a pictograph is kept, except a variation selector trailing a dropped
/// pictograph.
pub fn limit_emojis(text: &str, max: usize) -> StageOutcome {
    let (limited, dropped) = keep_pictographs(text, max);
    if dropped == 0 {
        return StageOutcome::unchanged(limited);
    }

    StageOutcome::changed(
        limited,
        StageNote::new(
            "Reduced emojis to platform-appropriate limit.",
            format!("Emojis limited to {} ({} removed).", max, dropped),
        ),
    )
}

pub fn strip_pictographs(text: &str) -> String {
    keep_pictographs(text, 0).0
}

fn keep_pictographs(text: &str, max: usize) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut kept = 0usize;
    let mut dropped = 0usize;
    let mut dropping_selector = false;

    for ch in text.chars() {
        if ch == VARIATION_SELECTOR && dropping_selector {
            dropping_selector = false;
            continue;
        }
        dropping_selector = false;

        if is_pictograph(ch) {
            if kept < max {
                kept += 1;
                output.push(ch);
            } else {
                dropped += 1;
                dropping_selector = true;
            }
            continue;
        }
        output.push(ch);
    }

    (output, dropped)
}
