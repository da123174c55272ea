#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Effect, FactSet};

/// A desired fact with an urgency.
///
/// Higher `priority` values are more urgent. A `removable` goal is discarded once achieved; a
/// persistent goal stays in the set and can be selected again whenever its target is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Goal<E> {
    pub target: E,
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub removable: bool,
}

impl<E: Effect> Goal<E> {
    pub fn new(target: E, priority: i32) -> Self {
        Self {
            target,
            priority,
            removable: false,
        }
    }

    pub fn removable(mut self) -> Self {
        self.removable = true;
        self
    }

    pub fn is_satisfied(&self, facts: &FactSet<E>) -> bool {
        facts.contains(self.target)
    }
}

/// Stable handle for a goal inside one agent's [`GoalSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoalId(pub u64);

/// An agent's goals, in insertion order.
///
/// `revision` bumps on every mutation so callers can cheaply detect "goals changed since X".
#[derive(Debug, Clone)]
pub struct GoalSet<E> {
    entries: Vec<(GoalId, Goal<E>)>,
    next_id: u64,
    revision: u64,
}

impl<E> Default for GoalSet<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            revision: 0,
        }
    }
}

impl<E: Effect> GoalSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, goal: Goal<E>) -> GoalId {
        let id = GoalId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, goal));
        self.revision += 1;
        id
    }

    pub fn remove(&mut self, id: GoalId) -> Option<Goal<E>> {
        let idx = self.entries.iter().position(|(gid, _)| *gid == id)?;
        self.revision += 1;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, id: GoalId) -> Option<&Goal<E>> {
        self.entries
            .iter()
            .find(|(gid, _)| *gid == id)
            .map(|(_, goal)| goal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> impl Iterator<Item = (GoalId, &Goal<E>)> + '_ {
        self.entries.iter().map(|(id, goal)| (*id, goal))
    }

    /// Goals in evaluation order: descending priority, insertion order among equals.
    pub fn by_priority(&self) -> Vec<(GoalId, &Goal<E>)> {
        let mut ordered: Vec<_> = self.iter().collect();
        ordered.sort_by(|a, b| b.1.priority.cmp(&a.1.priority));
        ordered
    }
}

impl<E: Effect> FromIterator<Goal<E>> for GoalSet<E> {
    fn from_iter<I: IntoIterator<Item = Goal<E>>>(iter: I) -> Self {
        let mut set = Self::new();
        for goal in iter {
            set.push(goal);
        }
        set
    }
}
