use crate::features::has_cta;
use crate::platform::PlatformRules;
use crate::transform::{StageNote, StageOutcome};

/// Appends the platform's primary CTA, on its own line where the platform
/// allows line breaks.
pub fn insert_cta(text: &str, rules: &PlatformRules) -> String {
    format!("{}{}{}", text, rules.cta_separator(), rules.primary_cta())
}

pub fn ensure_cta(text: &str, rules: &PlatformRules) -> StageOutcome {
    if has_cta(text) {
        return StageOutcome::unchanged(text);
    }

    StageOutcome::changed(
        insert_cta(text, rules),
        StageNote::new(
            "Inserted a clear call-to-action.",
            format!("Appended platform-appropriate CTA \"{}\".", rules.primary_cta()),
        ),
    )
}
