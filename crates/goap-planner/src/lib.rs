//! Deterministic GOAP planner.
//!
//! [`Planner::plan`] searches every ordering of distinct catalog actions reachable from the
//! current facts and returns the cheapest one that produces the goal effect. [`Planner::select`]
//! runs that search for each goal in priority order and keeps the first success.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod plan;
pub mod planner;
pub mod select;

pub use error::PlanError;
pub use plan::Plan;
pub use planner::{Planner, PlannerConfig, SearchStats};
pub use select::Selection;
