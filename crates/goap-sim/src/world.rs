use std::collections::BTreeMap;

use goap::agent::GoapWorld;
use goap::core::{FactSet, WorldView};
use goap::nav::{GridError, MoveStatus, Mover, NavGrid, NavWorld, Navigator, Vec3};

use crate::config::{DriveConfig, WorldConfig};
use crate::drives::Drives;
use crate::fact::Fact;

pub type HerbivoreId = u64;
pub type SourceId = u32;

pub const WATER_TAG: &str = "water";
pub const PLANT_TAG: &str = "plant";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Water,
    Plant,
}

/// A consumable fixture: a water source or a plant.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: SourceId,
    pub kind: SourceKind,
    pub position: Vec3,
    /// Seconds until an eaten plant is whole again.
    pub regrowing: Option<f32>,
}

impl Source {
    /// Tag visible to sensing and lookup. Regrowing plants carry none.
    pub fn tag(&self) -> Option<&'static str> {
        match (self.kind, self.regrowing) {
            (SourceKind::Water, _) => Some(WATER_TAG),
            (SourceKind::Plant, None) => Some(PLANT_TAG),
            (SourceKind::Plant, Some(_)) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Organism {
    pub mover: Mover,
    pub drives: Drives,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub drinks: u64,
    pub meals: u64,
    pub missed_meals: u64,
}

/// Grid world hosting herbivores and their food and water.
#[derive(Debug, Clone)]
pub struct SimWorld {
    grid: NavGrid,
    drive_config: DriveConfig,
    organisms: BTreeMap<HerbivoreId, Organism>,
    sources: Vec<Source>,
    stats: WorldStats,
}

impl SimWorld {
    pub fn new(layout: &WorldConfig, drive_config: DriveConfig) -> Result<Self, GridError> {
        let grid = NavGrid::new(layout.width, layout.depth, layout.cell_size)?
            .with_blocked(layout.blocked.iter().copied());

        let waters = layout.water.iter().map(|p| (SourceKind::Water, p));
        let plants = layout.plants.iter().map(|p| (SourceKind::Plant, p));
        let sources = waters
            .chain(plants)
            .enumerate()
            .map(|(i, (kind, [x, z]))| Source {
                id: i as SourceId,
                kind,
                position: Vec3::ground(*x, *z),
                regrowing: None,
            })
            .collect();

        let organisms = layout
            .herbivores
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let [x, z] = h.position;
                let organism = Organism {
                    mover: Mover::new(Vec3::ground(x, z), h.speed),
                    drives: Drives::default(),
                };
                (i as HerbivoreId + 1, organism)
            })
            .collect();

        Ok(Self {
            grid,
            drive_config,
            organisms,
            sources,
            stats: WorldStats::default(),
        })
    }

    pub fn herbivores(&self) -> impl Iterator<Item = HerbivoreId> + '_ {
        self.organisms.keys().copied()
    }

    pub fn organism(&self, id: HerbivoreId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn organism_mut(&mut self, id: HerbivoreId) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    pub fn despawn(&mut self, id: HerbivoreId) -> Option<Organism> {
        self.organisms.remove(&id)
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn drive_config(&self) -> &DriveConfig {
        &self.drive_config
    }

    /// Nearest source carrying `tag` within `radius` of `from`.
    pub fn sense(&self, from: Vec3, radius: f32, tag: &str) -> Option<SourceId> {
        self.nearest_tagged(from, tag, Some(radius))
    }

    fn nearest_tagged(&self, from: Vec3, tag: &str, radius: Option<f32>) -> Option<SourceId> {
        let mut best: Option<(f32, SourceId)> = None;
        for source in &self.sources {
            if source.tag() != Some(tag) {
                continue;
            }
            let d = source.position.distance(from);
            if radius.is_some_and(|r| d > r) {
                continue;
            }
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, source.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Applies an action's consumption when its timed execution starts.
    ///
    /// Drinking always yields water; eating only yields calories if the plant is whole, and
    /// starts its regrowth.
    pub fn consume(&mut self, eater: HerbivoreId, source: SourceId, effects: &FactSet<Fact>) {
        let Some(idx) = self.sources.iter().position(|s| s.id == source) else {
            return;
        };
        let Some(organism) = self.organisms.get_mut(&eater) else {
            return;
        };
        let item = &mut self.sources[idx];

        if effects.contains(Fact::Quenched) && item.kind == SourceKind::Water {
            organism.drives.drink(self.drive_config.water_per_drink);
            self.stats.drinks += 1;
            tracing::debug!(herbivore = eater, source, "drank");
        }
        if effects.contains(Fact::Sated) && item.kind == SourceKind::Plant {
            if item.regrowing.is_none() {
                organism.drives.eat(self.drive_config.calories_per_plant);
                item.regrowing = Some(self.drive_config.plant_regrow_seconds);
                self.stats.meals += 1;
                tracing::debug!(herbivore = eater, source, "ate plant");
            } else {
                self.stats.missed_meals += 1;
                tracing::debug!(herbivore = eater, source, "plant already eaten");
            }
        }
    }

    /// Advances movement and plant regrowth.
    pub fn step(&mut self, dt_seconds: f32) {
        for (id, organism) in self.organisms.iter_mut() {
            if organism.mover.step(&self.grid, dt_seconds) == MoveStatus::Blocked {
                tracing::trace!(herbivore = *id, "no path to destination");
            }
        }
        for source in self.sources.iter_mut() {
            if let Some(remaining) = source.regrowing {
                let remaining = remaining - dt_seconds;
                source.regrowing = (remaining > 0.0).then_some(remaining);
            }
        }
    }
}

impl WorldView for SimWorld {
    type Agent = HerbivoreId;
    type Entity = SourceId;
}

impl NavWorld for SimWorld {
    fn position(&self, agent: HerbivoreId) -> Option<Vec3> {
        self.organisms.get(&agent).map(|o| o.mover.position)
    }

    fn move_to(&mut self, agent: HerbivoreId, destination: Vec3) {
        if let Some(o) = self.organisms.get_mut(&agent) {
            o.mover.move_to(destination);
        }
    }

    fn halt(&mut self, agent: HerbivoreId) {
        if let Some(o) = self.organisms.get_mut(&agent) {
            o.mover.halt();
        }
    }

    fn resume(&mut self, agent: HerbivoreId) {
        if let Some(o) = self.organisms.get_mut(&agent) {
            o.mover.resume();
        }
    }

    fn can_reach(&self, agent: HerbivoreId, destination: Vec3) -> bool {
        self.position(agent)
            .is_some_and(|from| self.grid.can_reach(from, destination))
    }

    fn sample_position(&self, near: Vec3, max_distance: f32) -> Option<Vec3> {
        self.grid.sample_near(near, max_distance)
    }
}

impl GoapWorld for SimWorld {
    fn find_by_tag(&self, agent: HerbivoreId, tag: &str) -> Option<SourceId> {
        let from = self.position(agent)?;
        self.nearest_tagged(from, tag, None)
    }

    fn closest_point(&self, entity: SourceId, _from: Vec3) -> Option<Vec3> {
        self.sources
            .iter()
            .find(|s| s.id == entity)
            .map(|s| s.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HerbivoreConfig;

    fn layout() -> WorldConfig {
        WorldConfig {
            width: 10,
            depth: 10,
            cell_size: 1.0,
            blocked: vec![[5, 5]],
            water: vec![[1.5, 1.5]],
            plants: vec![[8.5, 8.5], [2.5, 8.5]],
            herbivores: vec![HerbivoreConfig {
                position: [4.5, 4.5],
                speed: 2.0,
            }],
        }
    }

    #[test]
    fn sources_are_numbered_water_first() {
        let world = SimWorld::new(&layout(), DriveConfig::default()).unwrap();
        let kinds: Vec<_> = world.sources().iter().map(|s| (s.id, s.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, SourceKind::Water),
                (1, SourceKind::Plant),
                (2, SourceKind::Plant)
            ]
        );
        assert_eq!(world.herbivores().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn lookup_and_sensing_pick_the_nearest_tagged_source() {
        let world = SimWorld::new(&layout(), DriveConfig::default()).unwrap();
        assert_eq!(world.find_by_tag(1, PLANT_TAG), Some(2));
        assert_eq!(world.find_by_tag(1, WATER_TAG), Some(0));
        assert_eq!(world.find_by_tag(1, "rock"), None);

        let at = Vec3::ground(8.0, 8.0);
        assert_eq!(world.sense(at, 1.0, PLANT_TAG), Some(1));
        assert_eq!(world.sense(at, 1.0, WATER_TAG), None);
    }

    #[test]
    fn eaten_plant_is_hidden_until_it_regrows() {
        let mut world = SimWorld::new(&layout(), DriveConfig::default()).unwrap();
        world.organism_mut(1).unwrap().drives.energy = 50.0;
        let sated: FactSet<Fact> = [Fact::Sated].into();

        world.consume(1, 2, &sated);
        assert_eq!(world.organism(1).unwrap().drives.energy, 90.0);
        assert_eq!(world.sources()[2].tag(), None);
        assert_eq!(world.find_by_tag(1, PLANT_TAG), Some(1));

        // A second bite finds nothing.
        world.consume(1, 2, &sated);
        assert_eq!(world.organism(1).unwrap().drives.energy, 90.0);
        assert_eq!(world.stats().missed_meals, 1);

        for _ in 0..100 {
            world.step(0.1);
        }
        assert_eq!(world.sources()[2].tag(), Some(PLANT_TAG));
    }

    #[test]
    fn drinking_uses_the_configured_amount() {
        let mut world = SimWorld::new(&layout(), DriveConfig::default()).unwrap();
        world.organism_mut(1).unwrap().drives.hydration = 50.0;
        world.consume(1, 0, &[Fact::Quenched].into());
        assert_eq!(world.organism(1).unwrap().drives.hydration, 70.0);
        assert_eq!(world.stats().drinks, 1);
    }

    #[test]
    fn reachability_respects_blocked_cells() {
        let mut config = layout();
        // Wall off column 7 entirely.
        config.blocked = (0..10).map(|z| [7, z]).collect();
        let world = SimWorld::new(&config, DriveConfig::default()).unwrap();

        assert!(world.can_reach(1, Vec3::ground(1.5, 1.5)));
        assert!(!world.can_reach(1, Vec3::ground(8.5, 8.5)));
        assert!(world.sample_position(Vec3::ground(7.5, 3.5), 2.0).is_some());
        assert_eq!(world.sample_position(Vec3::ground(-30.0, 3.5), 2.0), None);
    }
}
