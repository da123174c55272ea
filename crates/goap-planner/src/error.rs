use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no sequence of distinct actions reaches the goal")]
    NoPlan,

    #[error("search budget of {max} expansions exhausted")]
    BudgetExhausted { max: usize },
}
