/// Coarse, display-oriented view of where an agent is in its action cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentPhase {
    /// No plan and no action.
    Idle,
    /// A plan is waiting and no action is current.
    Queued,
    /// The current action needs a target that has not been reached yet.
    AcquiringTarget,
    /// Waiting out the current action's duration.
    Executing,
    /// Frozen by [`Agent::pause`](crate::Agent::pause).
    Paused,
}

impl AgentPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentPhase::Idle => "idle",
            AgentPhase::Queued => "queued",
            AgentPhase::AcquiringTarget => "acquiring_target",
            AgentPhase::Executing => "executing",
            AgentPhase::Paused => "paused",
        }
    }
}
