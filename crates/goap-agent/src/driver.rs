use goap_core::{AgentId, Effect, TickContext};

use crate::{Agent, GoapWorld};

/// Ticks every agent once, in stable id order.
///
/// Agents share nothing but the world; the fixed order keeps a seeded run reproducible.
pub fn tick_agents<E, W>(ctx: &TickContext, world: &mut W, agents: &mut [Agent<E, W>])
where
    E: Effect,
    W: GoapWorld,
{
    agents.sort_by_key(|a| a.id().stable_id());
    for agent in agents.iter_mut() {
        agent.tick(ctx, world);
    }
}
