#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use goap_agent::{Agent, GoapWorld};
use goap_core::{TickContext, WorldView};
use goap_nav::{NavWorld, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fact {
    Hungry,
    HasFood,
    Sated,
    Rested,
    Quenched,
}

#[derive(Debug, Clone)]
pub struct Thing {
    pub id: u32,
    pub tag: &'static str,
    pub position: Vec3,
}

/// Straight-line world: agents glide toward their destination at `speed` units per second.
#[derive(Debug, Default)]
pub struct ToyWorld {
    pub positions: BTreeMap<u64, Vec3>,
    pub destinations: BTreeMap<u64, Vec3>,
    pub halted: BTreeSet<u64>,
    pub things: Vec<Thing>,
    pub speed: f32,
    /// Agents never move, whatever they are told.
    pub frozen: bool,
    /// `find_by_tag` always misses.
    pub no_locator: bool,
    /// `sample_position` always misses.
    pub no_samples: bool,
    pub log: Vec<String>,
}

impl ToyWorld {
    pub fn new() -> Self {
        Self {
            speed: 5.0,
            ..Self::default()
        }
    }

    pub fn with_agent(mut self, id: u64, at: Vec3) -> Self {
        self.positions.insert(id, at);
        self
    }

    pub fn with_thing(mut self, id: u32, tag: &'static str, at: Vec3) -> Self {
        self.things.push(Thing {
            id,
            tag,
            position: at,
        });
        self
    }

    pub fn step(&mut self, dt: f32) {
        if self.frozen {
            return;
        }
        for (id, position) in self.positions.iter_mut() {
            if self.halted.contains(id) {
                continue;
            }
            let Some(dest) = self.destinations.get(id).copied() else {
                continue;
            };
            let to = dest - *position;
            let dist = to.length();
            let reach = self.speed * dt;
            *position = if dist <= reach {
                dest
            } else {
                *position + to * (reach / dist)
            };
        }
    }
}

impl WorldView for ToyWorld {
    type Agent = u64;
    type Entity = u32;
}

impl NavWorld for ToyWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.positions.get(&agent).copied()
    }

    fn move_to(&mut self, agent: u64, destination: Vec3) {
        self.destinations.insert(agent, destination);
        self.halted.remove(&agent);
    }

    fn halt(&mut self, agent: u64) {
        self.halted.insert(agent);
    }

    fn resume(&mut self, agent: u64) {
        self.halted.remove(&agent);
    }

    fn can_reach(&self, _agent: u64, _destination: Vec3) -> bool {
        true
    }

    fn sample_position(&self, near: Vec3, _max_distance: f32) -> Option<Vec3> {
        if self.no_samples {
            return None;
        }
        Some(Vec3::ground(near.x, near.z))
    }
}

impl GoapWorld for ToyWorld {
    fn find_by_tag(&self, _agent: u64, tag: &str) -> Option<u32> {
        if self.no_locator {
            return None;
        }
        self.things.iter().find(|t| t.tag == tag).map(|t| t.id)
    }

    fn closest_point(&self, entity: u32, _from: Vec3) -> Option<Vec3> {
        self.things
            .iter()
            .find(|t| t.id == entity)
            .map(|t| t.position)
    }
}

pub const DT: f32 = 1.0;

/// Ticks the agent then steps the world, `ticks` times, continuing from `ctx`.
pub fn run(
    agent: &mut Agent<Fact, ToyWorld>,
    world: &mut ToyWorld,
    ctx: &mut TickContext,
    ticks: u32,
) {
    for _ in 0..ticks {
        *ctx = ctx.next();
        agent.tick(ctx, world);
        world.step(ctx.dt_seconds);
    }
}

pub fn start() -> TickContext {
    TickContext::new(0, DT, 7)
}
