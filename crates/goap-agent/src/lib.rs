//! GOAP agent runtime.
//!
//! An [`Agent`] owns one entity's facts, goals and plan. Each [`tick`](Agent::tick) it plans when
//! idle, dequeues the next action, acquires the action's target through the host's navigation and
//! sensing, waits out the action's duration without blocking other agents, then applies the
//! action's effects. Stuck detection and explicit cancellation abort the current goal and force a
//! replan.
//!
//! Hosts provide a world implementing [`GoapWorld`] (navigation + entity lookup) and forward
//! sensing triggers through [`Agent::on_sensed`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod driver;
pub mod listener;
pub mod phase;
pub mod stuck;
pub mod suspend;
pub mod world;

pub use agent::Agent;
pub use config::AgentConfig;
pub use driver::tick_agents;
pub use listener::{ActionStarted, ListenerId};
pub use phase::AgentPhase;
pub use stuck::StuckMonitor;
pub use suspend::Suspension;
pub use world::GoapWorld;
