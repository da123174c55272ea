//! Deterministic, engine-agnostic GOAP data model.
//!
//! Facts are symbolic: an agent's world knowledge is a set of [`Effect`] tokens. Actions and goals
//! are immutable catalog entries shared by reference across every agent that uses them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod catalog;
pub mod effect;
pub mod error;
pub mod goal;
pub mod rng;
pub mod tick;
pub mod world;

pub use action::{same_action, Action, ActionRef, TargetSpec};
pub use catalog::Catalog;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub use catalog::{ActionDef, CatalogDef};
pub use effect::{Effect, FactSet};
pub use error::CatalogError;
pub use goal::{Goal, GoalId, GoalSet};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{AgentId, WorldView};
