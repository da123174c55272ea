use thiserror::Error;

/// Catalog misconfiguration detected at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("action `{action}` has invalid cost {cost} (must be finite and >= 0)")]
    InvalidCost { action: String, cost: f32 },

    #[error("action `{action}` has invalid duration {duration} (must be finite and >= 0)")]
    InvalidDuration { action: String, duration: f32 },

    #[error("action `{action}` requires a target but its target tag is empty")]
    EmptyTargetTag { action: String },

    #[error("duplicate action name `{0}`")]
    DuplicateAction(String),

    #[error("duplicate goal for effect {0}")]
    DuplicateGoal(String),

    #[error("goal {0} is not produced by any action")]
    UnreachableGoal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
