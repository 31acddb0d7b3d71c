use crate::transform::{StageNote, StageOutcome};

pub const HOOK_SENTENCE: &str = "Looking for a smarter way to get results?";

/// Leads with a question unless the text already asks one.
pub fn ensure_hook(text: &str) -> StageOutcome {
    if text.contains('?') {
        return StageOutcome::unchanged(text);
    }

    let body = text.trim();
    let hooked = if body.is_empty() {
        HOOK_SENTENCE.to_string()
    } else {
        format!("{} {}", HOOK_SENTENCE, body)
    };

    StageOutcome::changed(
        hooked,
        StageNote::new(
            "Added a question hook to increase curiosity/engagement.",
            "Prepended a short question.",
        ),
    )
}
