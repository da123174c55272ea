//! Umbrella crate that re-exports the `goap-*` building blocks.
//!
//! Enable only what you need with features; `full` (the default) pulls in everything.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use goap_core as core;

#[cfg(feature = "planner")]
#[cfg_attr(docsrs, doc(cfg(feature = "planner")))]
pub use goap_planner as planner;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use goap_nav as nav;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use goap_tools as tools;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use goap_agent as agent;

/// The types most hosts touch, in one import.
#[cfg(feature = "full")]
pub mod prelude {
    pub use goap_agent::{tick_agents, Agent, AgentConfig, AgentPhase, GoapWorld};
    pub use goap_core::{
        Action, ActionRef, Catalog, Effect, FactSet, Goal, TargetSpec, TickContext, WorldView,
    };
    pub use goap_nav::{NavWorld, Vec3};
    pub use goap_planner::{Plan, PlanError, Planner};
    pub use goap_tools::Tracer;
}
