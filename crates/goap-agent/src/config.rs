#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-agent tuning. Distances are world units, times are seconds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AgentConfig {
    /// Radius of the host's sensing trigger for this agent.
    pub sense_radius: f32,
    /// Maximum distance of a random exploration point.
    pub search_radius: f32,
    /// The agent has arrived once it is closer than this to its destination.
    pub arrival_distance: f32,
    /// Base time without displacement before the agent counts as stuck.
    pub stuck_threshold_seconds: f32,
    /// Displacement at or below this counts as "not moving".
    pub stuck_tolerance: f32,
    /// Exploration points tried per tick before giving up until the next tick.
    pub max_search_samples: u32,
    /// Check an action's preconditions again when it is dequeued.
    pub revalidate_preconditions: bool,
    /// After a planning failure, skip the search until facts or goals change.
    pub cache_failed_plans: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sense_radius: 10.0,
            search_radius: 10.0,
            arrival_distance: 2.0,
            stuck_threshold_seconds: 10.0,
            stuck_tolerance: 0.05,
            max_search_samples: 8,
            revalidate_preconditions: true,
            cache_failed_plans: true,
        }
    }
}
