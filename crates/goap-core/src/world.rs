use core::fmt::Debug;

/// Stable identifier for an agent.
///
/// Deterministic simulation requires a stable ordering (`Ord`) and a stable numeric id
/// (`stable_id`) for seeding and logs.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// The host world as seen by GOAP agents.
///
/// The core crate does not prescribe which queries a world must expose; navigation, sensing and
/// lookup live in extension traits of the crates that need them.
pub trait WorldView {
    type Agent: AgentId;
    /// Reference to an external entity an action can target (a water source, a plant, ...).
    type Entity: Copy + Eq + Debug;
}
