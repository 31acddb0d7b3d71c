use thiserror::Error;

/// Errors surfaced by the optimizer. Per-item content problems never end up
/// here; they are reported as warnings on the affected item.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The batch itself is malformed (for example, no posts were supplied).
    #[error("validation error: {0}")]
    Validation(String),

    /// The configuration file could not be read, parsed, or holds invalid rules.
    #[error("config error: {0}")]
    Config(String),
}

impl OptimizeError {
    pub fn is_validation(&self) -> bool {
        matches!(self, OptimizeError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
