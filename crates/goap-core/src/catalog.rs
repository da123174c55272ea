use std::collections::BTreeSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Action, ActionRef, CatalogError, Effect, Goal};

/// Validated, read-only action and goal catalog.
///
/// Cloning is cheap: the action list is shared, so any number of agents can hold the same
/// catalog without copying action descriptors.
#[derive(Debug, Clone)]
pub struct Catalog<E: Effect> {
    actions: Arc<[ActionRef<E>]>,
    goals: Arc<[Goal<E>]>,
}

impl<E: Effect> Catalog<E> {
    pub fn new(actions: Vec<Action<E>>, goals: Vec<Goal<E>>) -> Result<Self> {
        validate(&actions, &goals)?;
        Ok(Self {
            actions: actions.into_iter().map(Arc::new).collect(),
            goals: goals.into(),
        })
    }

    pub fn actions(&self) -> &[ActionRef<E>] {
        &self.actions
    }

    /// Shared handle to the action list (for handing to agents).
    pub fn shared_actions(&self) -> Arc<[ActionRef<E>]> {
        Arc::clone(&self.actions)
    }

    pub fn goals(&self) -> &[Goal<E>] {
        &self.goals
    }

    pub fn action(&self, name: &str) -> Option<&ActionRef<E>> {
        self.actions.iter().find(|a| a.name == name)
    }
}

fn validate<E: Effect>(actions: &[Action<E>], goals: &[Goal<E>]) -> Result<()> {
    let mut names = BTreeSet::new();
    for action in actions {
        if !action.cost.is_finite() || action.cost < 0.0 {
            return Err(CatalogError::InvalidCost {
                action: action.name.clone(),
                cost: action.cost,
            });
        }
        if !action.duration.is_finite() || action.duration < 0.0 {
            return Err(CatalogError::InvalidDuration {
                action: action.name.clone(),
                duration: action.duration,
            });
        }
        if action.target_tag().is_some_and(|tag| tag.trim().is_empty()) {
            return Err(CatalogError::EmptyTargetTag {
                action: action.name.clone(),
            });
        }
        if !names.insert(action.name.as_str()) {
            return Err(CatalogError::DuplicateAction(action.name.clone()));
        }
    }

    let mut targets = BTreeSet::new();
    for goal in goals {
        if !targets.insert(goal.target) {
            return Err(CatalogError::DuplicateGoal(format!("{:?}", goal.target)));
        }
        let produced = actions
            .iter()
            .any(|a| a.after_effects.contains(goal.target));
        if !produced {
            return Err(CatalogError::UnreachableGoal(format!("{:?}", goal.target)));
        }
    }

    Ok(())
}

/// Authoring form of an action, as read from configuration files.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct ActionDef<E> {
    pub name: String,
    #[serde(default)]
    pub target: Option<crate::TargetSpec>,
    #[serde(default)]
    pub duration: f32,
    #[serde(default = "default_cost")]
    pub cost: f32,
    #[serde(default)]
    pub preconditions: Vec<E>,
    #[serde(default)]
    pub after_effects: Vec<E>,
}

#[cfg(feature = "serde")]
fn default_cost() -> f32 {
    1.0
}

/// Authoring form of a whole catalog.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct CatalogDef<E> {
    pub actions: Vec<ActionDef<E>>,
    #[serde(default)]
    pub goals: Vec<Goal<E>>,
}

#[cfg(feature = "serde")]
impl<E: Effect> From<ActionDef<E>> for Action<E> {
    fn from(def: ActionDef<E>) -> Self {
        Action {
            name: def.name,
            target: def.target,
            duration: def.duration,
            cost: def.cost,
            preconditions: def.preconditions.into_iter().collect(),
            after_effects: def.after_effects.into_iter().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl<E: Effect> Catalog<E> {
    pub fn from_def(def: CatalogDef<E>) -> Result<Self> {
        let actions = def.actions.into_iter().map(Action::from).collect();
        Self::new(actions, def.goals)
    }

    pub fn to_def(&self) -> CatalogDef<E> {
        CatalogDef {
            actions: self
                .actions
                .iter()
                .map(|a| ActionDef {
                    name: a.name.clone(),
                    target: a.target.clone(),
                    duration: a.duration,
                    cost: a.cost,
                    preconditions: a.preconditions.iter().collect(),
                    after_effects: a.after_effects.iter().collect(),
                })
                .collect(),
            goals: self.goals.to_vec(),
        }
    }
}
