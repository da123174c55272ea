use core::fmt::Debug;
use core::hash::Hash;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An atomic symbolic fact drawn from a closed vocabulary.
///
/// Any small `Copy + Ord` type qualifies; in practice this is a fieldless enum such as
/// `enum Fact { Hungry, Sated, Thirsty, Quenched }`. Only membership matters: effects carry no
/// value payload and no multiplicity.
pub trait Effect: Copy + Ord + Hash + Debug + 'static {}

impl<T> Effect for T where T: Copy + Ord + Hash + Debug + 'static {}

/// An unordered set of [`Effect`]s without duplicates.
///
/// Backed by a `BTreeSet` so iteration order (and therefore anything derived from it, such as
/// trace output) is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FactSet<E: Ord> {
    facts: BTreeSet<E>,
}

impl<E: Effect> Default for FactSet<E> {
    fn default() -> Self {
        Self {
            facts: BTreeSet::new(),
        }
    }
}

impl<E: Effect> FactSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `effect`; returns `false` if it was already present.
    pub fn insert(&mut self, effect: E) -> bool {
        self.facts.insert(effect)
    }

    /// Removes `effect`; returns `false` if it was absent.
    pub fn remove(&mut self, effect: E) -> bool {
        self.facts.remove(&effect)
    }

    pub fn contains(&self, effect: E) -> bool {
        self.facts.contains(&effect)
    }

    /// `true` iff every element of `other` is present in `self`.
    pub fn contains_all(&self, other: &FactSet<E>) -> bool {
        other.facts.is_subset(&self.facts)
    }

    /// Returns `self ∪ other` as a new snapshot.
    pub fn union(&self, other: &FactSet<E>) -> FactSet<E> {
        let mut out = self.clone();
        out.insert_all(other);
        out
    }

    pub fn insert_all(&mut self, other: &FactSet<E>) {
        self.facts.extend(other.facts.iter().copied());
    }

    pub fn remove_all(&mut self, other: &FactSet<E>) {
        for effect in other.iter() {
            self.facts.remove(&effect);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = E> + '_ {
        self.facts.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }
}

impl<E: Effect> FromIterator<E> for FactSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

impl<E: Effect> Extend<E> for FactSet<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.facts.extend(iter);
    }
}

impl<E: Effect, const N: usize> From<[E; N]> for FactSet<E> {
    fn from(value: [E; N]) -> Self {
        value.into_iter().collect()
    }
}
