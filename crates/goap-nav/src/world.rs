use goap_core::WorldView;

use crate::Vec3;

/// Navigation capabilities a GOAP agent needs from its host.
///
/// Everything here is per-agent and non-blocking: `move_to` only records a destination, the host
/// moves the agent on its own schedule and the agent polls `position` to detect arrival.
pub trait NavWorld: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    /// Set a new destination and un-pause movement.
    fn move_to(&mut self, agent: Self::Agent, destination: Vec3);

    /// Stop moving, keeping the destination.
    fn halt(&mut self, agent: Self::Agent);

    /// Resume moving toward the current destination (if any).
    fn resume(&mut self, agent: Self::Agent);

    /// Reachability (path completeness) from the agent's current position.
    fn can_reach(&self, agent: Self::Agent, destination: Vec3) -> bool;

    /// Nearest navigable point within `max_distance` of `near`.
    fn sample_position(&self, near: Vec3, max_distance: f32) -> Option<Vec3>;
}
