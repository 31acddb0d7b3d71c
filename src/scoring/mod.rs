pub mod heuristic;
pub mod summary;

pub use heuristic::{score_post, HeuristicScorer, ScoreAdjustment, ScoreCard, ScoreWeights, BASELINE_SCORE};
pub use summary::{summarize, BatchSummary, GUIDANCE};
