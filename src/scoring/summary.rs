use serde::{Deserialize, Serialize};

use crate::scoring::heuristic::round_to;
use crate::OptimizedItem;

pub const GUIDANCE: [&str; 5] = [
    "Keep hashtags within platform norms; excess hurts reach.",
    "Lead with a question or benefit hook to increase dwell time.",
    "Always include a single, specific CTA.",
    "Use 1 number or proof point to increase credibility.",
    "Avoid walls of text; add a line break before the CTA on platforms that allow it.",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub avg_score_delta: f64,
    pub winners: Vec<usize>,
    pub guidance: Vec<String>,
}

pub fn summarize(items: &[OptimizedItem]) -> BatchSummary {
    BatchSummary {
        avg_score_delta: average_delta(items),
        winners: winners(items),
        guidance: GUIDANCE.iter().map(|tip| tip.to_string()).collect(),
    }
}

/// Items without a prior score count as a zero delta; they stay in the
/// denominator.
fn average_delta(items: &[OptimizedItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let total: f64 = items
        .iter()
        .map(|item| match item.original_score {
            Some(original) => item.optimized_score - original,
            None => 0.0,
        })
        .sum();
    round_to(total / items.len() as f64, 2)
}

/// Every index sharing the top optimized score; ties are kept.
fn winners(items: &[OptimizedItem]) -> Vec<usize> {
    let best = items
        .iter()
        .map(|item| item.optimized_score)
        .fold(f64::NEG_INFINITY, f64::max);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.optimized_score == best)
        .map(|(index, _)| index)
        .collect()
}
