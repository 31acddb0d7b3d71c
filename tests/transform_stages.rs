use post_optimizer::features::{char_len, count_hashtags, count_pictographs, has_cta};
use post_optimizer::transform::{
    absorb_hashtags, enforce_hashtags, enforce_length, ensure_cta, ensure_hook, insert_cta, limit_emojis,
    normalize_tone, plan_hashtags, split_hashtags, HOOK_SENTENCE, LENGTH_FILLER,
};
use post_optimizer::{resolve_platform, PlatformRules};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn narrow_rules() -> PlatformRules {
    let mut rules = resolve_platform("General").clone();
    rules.min_chars = 60;
    rules.max_chars = 70;
    rules
}

#[test]
fn split_hashtags_keeps_order_and_strips_tokens() {
    let split = split_hashtags("Big news #Launch today #AI_2025!");
    assert_eq!(split.tags, tags(&["#Launch", "#AI_2025"]));
    assert_eq!(split.without, "Big news today !");
}

#[test]
fn absorb_hashtags_collects_tags_exposed_by_earlier_stages() {
    let mut collected = tags(&["#x"]);
    let limited = limit_emojis("🔥 #🚀alpha #🚀beta launch", 1).text;
    assert_eq!(limited, "🔥 #alpha #beta launch");

    let body = absorb_hashtags(limited, &mut collected);

    assert_eq!(body, "🔥 launch");
    assert_eq!(collected, tags(&["#x", "#alpha", "#beta"]));

    let untouched = absorb_hashtags("no tags here".to_string(), &mut collected);
    assert_eq!(untouched, "no tags here");
    assert_eq!(collected.len(), 3);
}

#[test]
fn professional_tone_strips_emoji_slang_and_repeated_bangs() {
    let outcome = normalize_tone("OMG this is lit!!! 🚀🔥", "Professional", resolve_platform("LinkedIn"));

    assert_eq!(outcome.text, "this is !");
    assert_eq!(count_pictographs(&outcome.text), 0);
    assert!(outcome.is_changed());
}

#[test]
fn energetic_tone_adds_platform_accent_once() {
    let twitter = normalize_tone("Launch day", "Energetic", resolve_platform("Twitter"));
    assert_eq!(twitter.text, "Launch day ✨");

    let linkedin = normalize_tone("Launch day", "very playful", resolve_platform("LinkedIn"));
    assert_eq!(linkedin.text, "Launch day!");

    let already = normalize_tone("Launch day!", "Friendly", resolve_platform("Twitter"));
    assert_eq!(already.text, "Launch day!");
    assert!(!already.is_changed());
}

#[test]
fn both_tone_rules_apply_in_sequence() {
    let outcome = normalize_tone("Hello 🚀", "Professional and friendly", resolve_platform("Twitter"));
    assert_eq!(outcome.text, "Hello ✨");
    assert_eq!(outcome.notes.len(), 2);
}

#[test]
fn unrecognised_tone_is_a_no_op() {
    let outcome = normalize_tone("Hey!! lol 🚀", "Witty", resolve_platform("Twitter"));
    assert_eq!(outcome.text, "Hey!! lol 🚀");
    assert!(!outcome.is_changed());
}

#[test]
fn hook_is_prepended_only_when_no_question_exists() {
    let hooked = ensure_hook("Launch week");
    assert_eq!(hooked.text, format!("{} Launch week", HOOK_SENTENCE));
    assert_eq!(hooked.notes.len(), 1);

    let again = ensure_hook(&hooked.text);
    assert_eq!(again.text, hooked.text);
    assert!(!again.is_changed());

    let asked = ensure_hook("Ready for launch?");
    assert_eq!(asked.text, "Ready for launch?");
    assert!(!asked.is_changed());

    assert_eq!(ensure_hook("").text, HOOK_SENTENCE);
}

#[test]
fn hook_joins_with_a_single_space() {
    let accented = normalize_tone("", "Energetic", resolve_platform("Twitter"));
    assert_eq!(accented.text, " ✨");

    let hooked = ensure_hook(&accented.text);
    assert_eq!(hooked.text, format!("{} ✨", HOOK_SENTENCE));
}

#[test]
fn cta_uses_platform_separator() {
    let twitter = ensure_cta("Hi", resolve_platform("Twitter"));
    assert_eq!(twitter.text, "Hi — Learn more");

    let instagram = ensure_cta("Hi", resolve_platform("Instagram"));
    assert_eq!(instagram.text, "Hi\nTap to explore");

    let present = ensure_cta("Ready? Shop now", resolve_platform("Instagram"));
    assert_eq!(present.text, "Ready? Shop now");
    assert!(!present.is_changed());
}

#[test]
fn emoji_limit_keeps_the_first_pictographs() {
    let outcome = limit_emojis("a🚀b🔥c✨", 1);
    assert_eq!(outcome.text, "a🚀bc");
    assert!(outcome.is_changed());

    let within = limit_emojis("a🚀b🔥c✨", 3);
    assert_eq!(within.text, "a🚀b🔥c✨");
    assert!(!within.is_changed());
}

#[test]
fn emoji_limit_drops_variation_selector_of_removed_pictograph() {
    let outcome = limit_emojis("❤\u{FE0F}❤\u{FE0F} thanks", 1);
    assert_eq!(outcome.text, "❤\u{FE0F} thanks");
}

#[test]
fn over_long_text_is_compressed_and_keeps_trailing_cta() {
    let sentence = "Our platform helps busy teams plan, publish, and measure campaigns across every channel (including the ones you forgot about).";
    let text = format!("{} {} {} — Learn more", sentence, sentence, sentence);
    let rules = resolve_platform("Twitter");

    let outcome = enforce_length(&text, rules, 0);

    assert!(char_len(&outcome.text) <= rules.max_chars);
    assert!(outcome.text.ends_with(" — Learn more"));
    assert!(!outcome.text.contains("forgot"));
    assert_eq!(
        outcome.notes[0].adjustment,
        format!("Trimmed from {} to {} chars.", char_len(&text), char_len(&outcome.text))
    );
}

#[test]
fn compression_reserves_room_for_hashtags() {
    let sentence = "Our platform helps busy teams plan, publish, and measure campaigns across every channel (including the ones you forgot about).";
    let text = format!("{} {} {}\nLearn more", sentence, sentence, sentence);

    let outcome = enforce_length(&text, resolve_platform("General"), 20);

    assert!(char_len(&outcome.text) <= 140);
    assert!(outcome.text.ends_with("\nLearn more"));
}

#[test]
fn short_text_is_extended_with_filler_and_cta() {
    let outcome = enforce_length("Hi", resolve_platform("TikTok"), 0);

    assert_eq!(outcome.text, format!("Hi{}\nWatch now", LENGTH_FILLER));
    assert!(char_len(&outcome.text) >= 50);
    assert_eq!(outcome.notes[0].reason, "Expanded copy to meet minimum platform length.");
}

#[test]
fn text_inside_window_is_left_alone() {
    let text = "Ready to grow? Shop now and keep your team focused on the work that matters most to customers";
    let outcome = enforce_length(text, resolve_platform("General"), 0);
    assert_eq!(outcome.text, text);
    assert!(!outcome.is_changed());
}

// Extension followed by the max cap can cut off the CTA it just added and
// fall short of the minimum again.
#[test]
fn truncation_after_extension_can_drop_the_cta() {
    let rules = narrow_rules();
    let text = "Fresh roasted coffee beans delivered every morning";
    assert_eq!(char_len(text), 50);
    assert!(!has_cta(text));

    let outcome = enforce_length(text, &rules, 0);

    assert_eq!(
        outcome.text,
        "Fresh roasted coffee beans delivered every morning • Why it matters: r"
    );
    assert_eq!(char_len(&outcome.text), 70);
    assert!(!has_cta(&outcome.text));
    assert!(!outcome.text.ends_with(&insert_cta("", &rules)));
}

#[test]
fn hashtag_plan_caps_at_maximum() {
    let plan = plan_hashtags(&tags(&["#a", "#b", "#c", "#d"]), resolve_platform("Twitter"));
    assert_eq!(plan.tags, tags(&["#a", "#b"]));
    assert_eq!(plan.dropped, 2);
    assert!(!plan.fallback_added);
}

#[test]
fn hashtag_plan_adds_fallback_to_reach_minimum() {
    let plan = plan_hashtags(&[], resolve_platform("Instagram"));
    assert_eq!(plan.tags, tags(&["#InstaDaily"]));
    assert!(plan.fallback_added);
    assert!(!plan.fallback_blocked);
    assert_eq!(plan.suffix(), " #InstaDaily");
    assert_eq!(plan.suffix_len(), 12);
}

#[test]
fn hashtag_plan_never_duplicates_the_fallback() {
    let mut rules = resolve_platform("Instagram").clone();
    rules.hashtags_min = 2;

    let plan = plan_hashtags(&tags(&["#InstaDaily"]), &rules);

    assert_eq!(plan.tags, tags(&["#InstaDaily"]));
    assert!(plan.fallback_blocked);
    assert!(plan.tags.len() < rules.hashtags_min);

    let fresh = plan_hashtags(&tags(&["#Coffee"]), &rules);
    assert_eq!(fresh.tags, tags(&["#Coffee", "#InstaDaily"]));
    assert!(!fresh.fallback_blocked);
}

#[test]
fn enforce_hashtags_reattaches_surviving_tags() {
    let rules = resolve_platform("Twitter");
    let outcome = enforce_hashtags("Body text ", rules, &tags(&["#a", "#b", "#c"]));

    assert_eq!(outcome.text, "Body text #a #b");
    assert_eq!(count_hashtags(&outcome.text), 2);
    assert_eq!(outcome.notes[0].adjustment, "Hashtags: 3 → 2 (allowed 0–2).");

    let untouched = enforce_hashtags("Body", rules, &tags(&["#a"]));
    assert_eq!(untouched.text, "Body #a");
    assert!(!untouched.is_changed());
}
