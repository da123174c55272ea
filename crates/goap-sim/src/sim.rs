use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};

use goap::agent::{tick_agents, Agent, AgentPhase};
use goap::core::{Catalog, TickContext};
use goap::nav::NavWorld;
use goap::planner::{Planner, PlannerConfig};
use goap::tools::{TraceLog, Tracer};

use crate::config::SimConfig;
use crate::fact::Fact;
use crate::world::{HerbivoreId, SimWorld};

pub type Herbivore = Agent<Fact, SimWorld>;

/// One line of the periodic readout.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub id: HerbivoreId,
    pub phase: AgentPhase,
    pub action: Option<String>,
    pub goal: Option<Fact>,
    pub hydration: f32,
    pub energy: f32,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let goal = self.goal.map_or("-", Fact::as_str);
        write!(
            f,
            "#{:<3} {:<16} action={:<6} goal={:<8} hydration={:>5.1} energy={:>5.1}",
            self.id,
            self.phase.as_str(),
            self.action.as_deref().unwrap_or("-"),
            goal,
            self.hydration,
            self.energy,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub seconds: f64,
    pub alive: usize,
    pub deaths: usize,
    pub drinks: u64,
    pub meals: u64,
    pub missed_meals: u64,
}

/// Herbivores, their agents and the world they share.
pub struct Simulation {
    world: SimWorld,
    agents: Vec<Herbivore>,
    ctx: TickContext,
    deaths: Vec<HerbivoreId>,
    retired_traces: BTreeMap<HerbivoreId, TraceLog>,
}

impl Simulation {
    pub fn new(config: &SimConfig, catalog: &Catalog<Fact>, trace: bool) -> Result<Self> {
        let world = SimWorld::new(&config.world, config.drives.clone())
            .context("Invalid world layout")?;
        let planner = Planner::new().with_config(PlannerConfig::from(&config.planner));

        let agents: Vec<Herbivore> = world
            .herbivores()
            .map(|id| {
                let mut agent = Agent::new(id, catalog)
                    .with_config(config.agent.clone())
                    .with_planner(planner);
                if trace {
                    agent = agent.with_tracer(Tracer::new().with_log());
                }
                // Consumption happens as the action starts, with the target in hand.
                agent.subscribe(|world: &mut SimWorld, started| {
                    if let Some(source) = started.target {
                        world.consume(started.agent, source, started.after_effects);
                    }
                });
                agent
            })
            .collect();

        Ok(Self {
            world,
            agents,
            ctx: TickContext::new(0, config.dt_seconds, config.seed),
            deaths: Vec::new(),
            retired_traces: BTreeMap::new(),
        })
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn agents(&self) -> &[Herbivore] {
        &self.agents
    }

    pub fn tick_count(&self) -> u64 {
        self.ctx.tick
    }

    pub fn tick(&mut self) {
        self.ctx = self.ctx.next();
        let dt = self.ctx.dt_seconds;

        self.update_drives(dt);
        self.sense();
        tick_agents(&self.ctx, &mut self.world, &mut self.agents);
        self.world.step(dt);
    }

    fn update_drives(&mut self, dt: f32) {
        let config = self.world.drive_config().clone();
        let mut dead = Vec::new();

        for agent in self.agents.iter_mut() {
            let Some(organism) = self.world.organism_mut(agent.id()) else {
                continue;
            };
            organism.drives.decay(dt, &config);
            let drives = organism.drives;

            let changes = drives.fact_changes(&config);
            for fact in changes.add {
                agent.add_fact(fact);
            }
            for fact in changes.remove {
                agent.remove_fact(fact);
            }
            if drives.is_dead() {
                dead.push(agent.id());
            }
        }

        if dead.is_empty() {
            return;
        }
        for id in &dead {
            self.world.despawn(*id);
            self.deaths.push(*id);
            tracing::info!(herbivore = *id, tick = self.ctx.tick, "herbivore died");
        }
        let retired = &mut self.retired_traces;
        self.agents.retain_mut(|agent| {
            if !dead.contains(&agent.id()) {
                return true;
            }
            if let Some(log) = agent.tracer_mut().take_log() {
                retired.insert(agent.id(), log);
            }
            false
        });
    }

    /// Reports the nearest source carrying each agent's sought tag, if one is in range.
    fn sense(&mut self) {
        for agent in self.agents.iter_mut() {
            let Some(tag) = agent.sought_tag().map(str::to_owned) else {
                continue;
            };
            let Some(position) = self.world.position(agent.id()) else {
                continue;
            };
            let radius = agent.config().sense_radius;
            if let Some(source) = self.world.sense(position, radius, &tag) {
                agent.on_sensed(&mut self.world, source, &tag);
            }
        }
    }

    pub fn status(&self) -> Vec<StatusLine> {
        self.agents
            .iter()
            .filter_map(|agent| {
                let drives = self.world.organism(agent.id())?.drives;
                Some(StatusLine {
                    id: agent.id(),
                    phase: agent.phase(),
                    action: agent.current_action().map(|a| a.name.clone()),
                    goal: agent.current_goal(),
                    hydration: drives.hydration,
                    energy: drives.energy,
                })
            })
            .collect()
    }

    pub fn summary(&self) -> Summary {
        let stats = self.world.stats();
        Summary {
            ticks: self.ctx.tick,
            seconds: self.ctx.tick as f64 * f64::from(self.ctx.dt_seconds),
            alive: self.agents.len(),
            deaths: self.deaths.len(),
            drinks: stats.drinks,
            meals: stats.meals,
            missed_meals: stats.missed_meals,
        }
    }

    /// Trace logs of every herbivore, living or dead, by id.
    pub fn trace_logs(&self) -> BTreeMap<HerbivoreId, TraceLog> {
        let mut logs = self.retired_traces.clone();
        for agent in &self.agents {
            if let Some(log) = agent.trace_log() {
                logs.insert(agent.id(), log.clone());
            }
        }
        logs
    }
}
