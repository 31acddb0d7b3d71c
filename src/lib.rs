pub mod config;
pub mod error;
pub mod features;
pub mod platform;
pub mod scoring;
pub mod transform;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use crate::error::{OptimizeError, Result};
pub use crate::features::{extract_features, FeatureSet};
pub use crate::platform::{resolve_platform, PlatformCatalog, PlatformRules};
pub use crate::scoring::{score_post, BatchSummary, HeuristicScorer};

use crate::features::{char_len, count_hashtags};
use crate::scoring::heuristic::round_to;
use crate::transform::{
    absorb_hashtags, enforce_hashtags, enforce_length, ensure_cta, ensure_hook, limit_emojis, normalize_tone,
    plan_hashtags, split_hashtags, StageOutcome,
};

/// One generated post to optimize, with the score it was generated with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCandidate {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub score: Option<f64>,
}

impl PostCandidate {
    pub fn new(post: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            post: post.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    pub platform: String,
    pub tone: String,
    pub target_audience: String,
    /// Accepted and echoed back; it does not change the pipeline today.
    pub length: String,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            platform: platform::GENERAL.to_string(),
            tone: "Neutral".to_string(),
            target_audience: String::new(),
            length: "auto".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedItem {
    pub original_post: String,
    pub optimized_post: String,
    pub original_score: Option<f64>,
    pub optimized_score: f64,
    pub features: FeatureSet,
    pub reasons: Vec<String>,
    pub adjustments: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub platform: String,
    pub tone: String,
    pub target_audience: String,
    pub length: String,
    pub items: Vec<OptimizedItem>,
    pub summary: BatchSummary,
}

/// Optimizes a batch against the built-in platform catalog.
pub fn optimize_posts(posts: &[PostCandidate], options: &OptimizeOptions) -> Result<OptimizationResult> {
    optimize_posts_with(platform::default_catalog(), posts, options)
}

pub fn optimize_posts_with(
    catalog: &PlatformCatalog,
    posts: &[PostCandidate],
    options: &OptimizeOptions,
) -> Result<OptimizationResult> {
    if posts.is_empty() {
        return Err(OptimizeError::Validation(
            "posts must be a non-empty array".to_string(),
        ));
    }

    let rules = catalog.resolve(&options.platform);
    let scorer = HeuristicScorer::default();
    let items: Vec<OptimizedItem> = posts
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let item = optimize_post(candidate, rules, &options.tone, &scorer);
            debug!(
                index,
                platform = %rules.key,
                score = item.optimized_score,
                length = item.features.length,
                changes = item.adjustments.len(),
                "optimized post"
            );
            if !item.warnings.is_empty() {
                warn!(index, warnings = ?item.warnings, "post still outside platform rules");
            }
            item
        })
        .collect();

    let summary = scoring::summarize(&items);
    info!(
        platform = %rules.key,
        posts = items.len(),
        avg_score_delta = summary.avg_score_delta,
        winners = ?summary.winners,
        "optimized batch"
    );

    Ok(OptimizationResult {
        platform: rules.key.clone(),
        tone: options.tone.clone(),
        target_audience: options.target_audience.clone(),
        length: options.length.clone(),
        items,
        summary,
    })
}

/// Runs every rewrite stage over one post and scores the result.
pub fn optimize_post(
    candidate: &PostCandidate,
    rules: &PlatformRules,
    tone: &str,
    scorer: &HeuristicScorer,
) -> OptimizedItem {
    let original_post = candidate.post.trim().to_string();
    let prior = candidate.score.filter(|score| score.is_finite());
    let mut log = ChangeLog::default();

    if original_post.is_empty() {
        log.warnings
            .push("Post text was empty; optimized from an empty draft.".to_string());
    }
    if prior.is_none() && candidate.score.is_some() {
        log.warnings.push(
            "Original score was not a finite number; scored from the 5.0 baseline.".to_string(),
        );
    }

    let split = split_hashtags(&original_post);
    let mut tags = split.tags;

    // Stripping pictographs or asides can join a stray `#` to the word after
    // it, so tags are collected again before the cap is applied.
    let working = log.record(normalize_tone(&split.without, tone, rules));
    let working = log.record(ensure_hook(&working));
    let working = log.record(ensure_cta(&working, rules));
    let working = log.record(limit_emojis(&working, rules.emojis_max));
    let working = absorb_hashtags(working, &mut tags);
    let reserved = plan_hashtags(&tags, rules).suffix_len();
    let working = log.record(enforce_length(&working, rules, reserved));
    let working = absorb_hashtags(working, &mut tags);
    let optimized_post = log.record(enforce_hashtags(&working, rules, &tags));

    let card = scorer.evaluate(&optimized_post, prior, rules);
    let features = card.features;
    log.warnings.extend(window_warnings(&optimized_post, &features, rules));

    OptimizedItem {
        original_post,
        optimized_post,
        original_score: prior.map(|score| round_to(score, 1)),
        optimized_score: card.score,
        features,
        reasons: log.reasons,
        adjustments: log.adjustments,
        warnings: log.warnings,
    }
}

/// Rule checks on the finished post. Each broken rule becomes one warning.
fn window_warnings(text: &str, features: &FeatureSet, rules: &PlatformRules) -> Vec<String> {
    let mut warnings = Vec::new();
    let length = char_len(text);
    if length > rules.max_chars {
        warnings.push(format!(
            "Post still exceeds max length ({}/{}).",
            length, rules.max_chars
        ));
    }
    if length < rules.min_chars {
        warnings.push(format!(
            "Post is under min length ({}/{}).",
            length, rules.min_chars
        ));
    }
    let hashtags = count_hashtags(text);
    if hashtags < rules.hashtags_min {
        warnings.push(format!(
            "Hashtags still below platform minimum ({}/{}).",
            hashtags, rules.hashtags_min
        ));
    }
    if hashtags > rules.hashtags_max {
        warnings.push(format!(
            "Hashtags still above platform maximum ({}/{}).",
            hashtags, rules.hashtags_max
        ));
    }
    if !features.has_cta() {
        warnings.push("Call-to-action was truncated away by the length cap.".to_string());
    }
    warnings
}

#[derive(Debug, Default)]
struct ChangeLog {
    reasons: Vec<String>,
    adjustments: Vec<String>,
    warnings: Vec<String>,
}

impl ChangeLog {
    fn record(&mut self, outcome: StageOutcome) -> String {
        for note in outcome.notes {
            self.reasons.push(note.reason);
            self.adjustments.push(note.adjustment);
        }
        outcome.text
    }
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_delta(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}
