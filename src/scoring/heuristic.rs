use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::features::{extract_features, FeatureSet};
use crate::platform::PlatformRules;

pub const BASELINE_SCORE: f64 = 5.0;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;
const WALL_OF_TEXT_CHARS: usize = 160;

static RE_EARLY_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[^.?!]{0,100}\?").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub cta: f64,
    pub numeral: f64,
    pub hashtags_in_range: f64,
    pub emojis_in_range: f64,
    pub early_question: f64,
    pub power_word: f64,
    pub length_out_of_range: f64,
    pub hashtag_excess: f64,
    pub emoji_excess: f64,
    pub wall_of_text: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cta: 0.4,
            numeral: 0.3,
            hashtags_in_range: 0.3,
            emojis_in_range: 0.2,
            early_question: 0.2,
            power_word: 0.3,
            length_out_of_range: -0.5,
            hashtag_excess: -0.3,
            emoji_excess: -0.3,
            wall_of_text: -0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreAdjustment {
    pub label: &'static str,
    pub delta: f64,
}

/// Everything that went into one score, for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub base: f64,
    pub features: FeatureSet,
    pub adjustments: Vec<ScoreAdjustment>,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    weights: ScoreWeights,
}

impl HeuristicScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, text: &str, base_score: Option<f64>, rules: &PlatformRules) -> f64 {
        self.evaluate(text, base_score, rules).score
    }

    pub fn evaluate(&self, text: &str, base_score: Option<f64>, rules: &PlatformRules) -> ScoreCard {
        let base = base_score
            .filter(|value| value.is_finite())
            .unwrap_or(BASELINE_SCORE);
        let features = extract_features(text);
        let weights = &self.weights;
        let mut adjustments = Vec::new();
        let mut apply = |applies: bool, label: &'static str, delta: f64| {
            if applies {
                adjustments.push(ScoreAdjustment { label, delta });
            }
        };

        let hashtags_in_range =
            features.hashtags >= rules.hashtags_min && features.hashtags <= rules.hashtags_max;
        let emojis_in_range = features.emojis > 0 && features.emojis <= rules.emojis_max;

        apply(features.has_cta(), "cta", weights.cta);
        apply(features.numerals > 0, "numeral", weights.numeral);
        apply(hashtags_in_range, "hashtags_in_range", weights.hashtags_in_range);
        apply(emojis_in_range, "emojis_in_range", weights.emojis_in_range);
        apply(RE_EARLY_QUESTION.is_match(text), "early_question", weights.early_question);
        apply(features.power_words > 0, "power_word", weights.power_word);
        apply(
            !rules.length_in_window(features.length),
            "length_out_of_range",
            weights.length_out_of_range,
        );
        apply(features.hashtags > rules.hashtags_max, "hashtag_excess", weights.hashtag_excess);
        apply(features.emojis > rules.emojis_max, "emoji_excess", weights.emoji_excess);
        apply(is_wall_of_text(text), "wall_of_text", weights.wall_of_text);

        let raw = base + adjustments.iter().map(|adjustment| adjustment.delta).sum::<f64>();
        ScoreCard {
            base,
            features,
            adjustments,
            score: finalize_score(raw),
        }
    }
}

pub fn score_post(text: &str, base_score: Option<f64>, rules: &PlatformRules) -> f64 {
    HeuristicScorer::default().score(text, base_score, rules)
}

/// A single line whose first sentence runs past 160 characters.
fn is_wall_of_text(text: &str) -> bool {
    if text.contains('\n') {
        return false;
    }
    text.split(['.', '!', '?'])
        .find(|sentence| !sentence.is_empty())
        .map(|sentence| sentence.chars().count() > WALL_OF_TEXT_CHARS)
        .unwrap_or(false)
}

fn finalize_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return BASELINE_SCORE;
    }
    round_to(raw, 1).clamp(MIN_SCORE, MAX_SCORE)
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
