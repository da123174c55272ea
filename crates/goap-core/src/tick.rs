use crate::{rng, AgentId, SplitMix64};

/// Per-tick inputs shared by every agent evaluated on that tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    /// The context for the following tick, same step and seed.
    pub fn next(&self) -> Self {
        Self {
            tick: self.tick + 1,
            ..*self
        }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), self.tick, stream);
        SplitMix64::new(seed)
    }
}
