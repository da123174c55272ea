//! Simulation file loading.

use std::path::Path;

use anyhow::{Context, Result};
use goap::agent::AgentConfig;
use goap::core::{Catalog, CatalogDef};
use goap::planner::PlannerConfig;
use serde::{Deserialize, Serialize};

use crate::fact::Fact;

/// Everything a run needs, loaded from one YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Ticks to run when `--ticks` is not given.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    #[serde(default = "default_dt")]
    pub dt_seconds: f32,

    /// Print a status readout every N ticks (0 disables it).
    #[serde(default = "default_report_every")]
    pub report_every: u64,

    pub catalog: CatalogDef<Fact>,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub planner: PlannerSection,

    #[serde(default)]
    pub drives: DriveConfig,

    pub world: WorldConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerSection {
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

impl From<&PlannerSection> for PlannerConfig {
    fn from(section: &PlannerSection) -> Self {
        PlannerConfig {
            max_expansions: section.max_expansions,
        }
    }
}

/// Organism drive tuning. Levels run from 0 to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Below this level the matching "satisfied" fact is dropped.
    pub comfort_point: f32,
    /// Hydration lost per second.
    pub thirst_factor: f32,
    /// At or below this hydration the organism is thirsty.
    pub thirst_point: f32,
    /// Energy lost per second.
    pub hunger_factor: f32,
    /// At or below this energy the organism is hungry.
    pub hunger_point: f32,
    pub water_per_drink: f32,
    pub calories_per_plant: f32,
    /// Seconds an eaten plant stays untargetable.
    pub plant_regrow_seconds: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            comfort_point: 90.0,
            thirst_factor: 1.0,
            thirst_point: 80.0,
            hunger_factor: 0.5,
            hunger_point: 60.0,
            water_per_drink: 20.0,
            calories_per_plant: 40.0,
            plant_regrow_seconds: 9.0,
        }
    }
}

/// Grid layout. Points are `[x, z]` in world units, cells are `[x, z]` indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: u32,
    pub depth: u32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default)]
    pub blocked: Vec<[i32; 2]>,
    #[serde(default)]
    pub water: Vec<[f32; 2]>,
    #[serde(default)]
    pub plants: Vec<[f32; 2]>,
    #[serde(default)]
    pub herbivores: Vec<HerbivoreConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HerbivoreConfig {
    pub position: [f32; 2],
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_seed() -> u64 {
    7
}
fn default_ticks() -> u64 {
    1200
}
fn default_dt() -> f32 {
    0.1
}
fn default_report_every() -> u64 {
    100
}
fn default_cell_size() -> f32 {
    1.0
}
fn default_speed() -> f32 {
    3.0
}

pub const DEFAULT_CONFIG: &str = r#"# goap-sim ecosystem configuration

seed: 7
ticks: 1200
dt_seconds: 0.1
report_every: 100

catalog:
  actions:
    - name: drink
      target: { tag: water, should_know: true }
      duration: 2.0
      cost: 1.0
      preconditions: [thirsty]
      after_effects: [quenched]
    - name: eat
      target: { tag: plant }
      duration: 3.0
      cost: 1.0
      preconditions: [hungry]
      after_effects: [sated]
  goals:
    - { target: quenched, priority: 2 }
    - { target: sated, priority: 1 }

agent:
  sense_radius: 6.0
  search_radius: 10.0
  arrival_distance: 1.0
  stuck_threshold_seconds: 10.0

planner:
  max_expansions: 10000

drives:
  comfort_point: 90
  thirst_factor: 1.0
  thirst_point: 80
  hunger_factor: 0.5
  hunger_point: 60
  water_per_drink: 20
  calories_per_plant: 40
  plant_regrow_seconds: 9

world:
  width: 40
  depth: 40
  cell_size: 1.0
  blocked: [[15, 10], [15, 11], [15, 12], [15, 13], [15, 14]]
  water: [[5.5, 5.5], [30.5, 25.5]]
  plants: [[20.5, 8.5], [10.5, 30.5], [25.5, 15.5], [33.5, 33.5]]
  herbivores:
    - { position: [12.5, 12.5], speed: 3.0 }
    - { position: [28.5, 20.5], speed: 2.5 }
"#;

impl SimConfig {
    /// Load a simulation from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read simulation from {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse simulation from {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        if config.world.width == 0 || config.world.depth == 0 {
            anyhow::bail!("world must be at least one cell wide and deep");
        }
        if !config.world.cell_size.is_finite() || config.world.cell_size <= 0.0 {
            anyhow::bail!("world.cell_size must be finite and > 0");
        }
        if !config.dt_seconds.is_finite() || config.dt_seconds <= 0.0 {
            anyhow::bail!("dt_seconds must be finite and > 0");
        }
        Ok(config)
    }

    /// Validates the catalog section and freezes it.
    pub fn build_catalog(&self) -> Result<Catalog<Fact>> {
        Catalog::from_def(self.catalog.clone()).context("Invalid catalog")
    }
}
