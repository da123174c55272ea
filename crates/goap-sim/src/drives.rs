use crate::config::DriveConfig;
use crate::fact::Fact;

const MAX_LEVEL: f32 = 100.0;
const MIN_LEVEL: f32 = 0.0;

/// An organism's hydration and energy, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drives {
    pub hydration: f32,
    pub energy: f32,
}

/// Fact edits implied by the current drive levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactChanges {
    pub add: Vec<Fact>,
    pub remove: Vec<Fact>,
}

impl Default for Drives {
    fn default() -> Self {
        Self {
            hydration: MAX_LEVEL,
            energy: MAX_LEVEL,
        }
    }
}

impl Drives {
    pub fn decay(&mut self, dt_seconds: f32, config: &DriveConfig) {
        self.hydration =
            (self.hydration - config.thirst_factor * dt_seconds).clamp(MIN_LEVEL, MAX_LEVEL);
        self.energy = (self.energy - config.hunger_factor * dt_seconds).clamp(MIN_LEVEL, MAX_LEVEL);
    }

    pub fn drink(&mut self, amount: f32) {
        self.hydration = (self.hydration + amount).clamp(MIN_LEVEL, MAX_LEVEL);
    }

    pub fn eat(&mut self, calories: f32) {
        self.energy = (self.energy + calories).clamp(MIN_LEVEL, MAX_LEVEL);
    }

    pub fn is_dead(&self) -> bool {
        self.hydration <= MIN_LEVEL || self.energy <= MIN_LEVEL
    }

    /// Need facts appear at their threshold; satisfaction facts lapse below the comfort point.
    pub fn fact_changes(&self, config: &DriveConfig) -> FactChanges {
        let mut changes = FactChanges::default();
        if self.hydration <= config.thirst_point {
            changes.add.push(Fact::Thirsty);
        }
        if self.energy <= config.hunger_point {
            changes.add.push(Fact::Hungry);
        }
        if self.hydration < config.comfort_point {
            changes.remove.push(Fact::Quenched);
        }
        if self.energy < config.comfort_point {
            changes.remove.push(Fact::Sated);
        }
        changes
    }
}
