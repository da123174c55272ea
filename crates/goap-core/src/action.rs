use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Effect, FactSet};

/// Which external entities qualify as an action's target, and how the agent finds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetSpec {
    /// Entity classification tag (e.g. `"water"`, `"plant"`).
    pub tag: String,
    /// When `true` the agent may resolve the target by direct lookup; otherwise it has to explore
    /// until sensing reports a matching entity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub should_know: bool,
}

impl TargetSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            should_know: false,
        }
    }

    pub fn known(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            should_know: true,
        }
    }
}

/// Immutable capability descriptor.
///
/// Actions do not implement `PartialEq`: two catalog entries are never the same
/// action even when every field matches. Identity is the allocation behind an [`ActionRef`].
#[derive(Debug, Clone)]
pub struct Action<E: Effect> {
    pub name: String,
    pub target: Option<TargetSpec>,
    /// Execution time in seconds (not planning cost).
    pub duration: f32,
    /// Planning weight.
    pub cost: f32,
    pub preconditions: FactSet<E>,
    pub after_effects: FactSet<E>,
}

/// Shared handle to a catalog action.
pub type ActionRef<E> = Arc<Action<E>>;

/// Catalog identity: `true` iff both handles point at the same catalog entry.
pub fn same_action<E: Effect>(a: &ActionRef<E>, b: &ActionRef<E>) -> bool {
    Arc::ptr_eq(a, b)
}

impl<E: Effect> Action<E> {
    /// A target-free, instantaneous action with cost `1.0` and no preconditions or effects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            duration: 0.0,
            cost: 1.0,
            preconditions: FactSet::new(),
            after_effects: FactSet::new(),
        }
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = Some(target);
        self
    }

    pub fn requires(mut self, effects: impl IntoIterator<Item = E>) -> Self {
        self.preconditions.extend(effects);
        self
    }

    pub fn produces(mut self, effects: impl IntoIterator<Item = E>) -> Self {
        self.after_effects.extend(effects);
        self
    }

    pub fn into_ref(self) -> ActionRef<E> {
        Arc::new(self)
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_tag(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.tag.as_str())
    }

    pub fn should_know_target(&self) -> bool {
        self.target.as_ref().is_some_and(|t| t.should_know)
    }

    /// `true` iff every precondition is present in `facts`.
    pub fn is_achievable(&self, facts: &FactSet<E>) -> bool {
        facts.contains_all(&self.preconditions)
    }
}
