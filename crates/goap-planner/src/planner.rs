use goap_core::{same_action, ActionRef, Effect, FactSet, Goal};

use crate::{Plan, PlanError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Upper bound on node expansions per `plan` call. `None` searches exhaustively.
    pub max_expansions: Option<usize>,
}

/// Counters from one search, for tracing and benchmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Child nodes created (one per applied action).
    pub expansions: usize,
    /// Goal-achieving nodes that improved on the best cost found so far.
    pub improvements: usize,
    /// Children skipped because their cost could not beat the best goal node.
    pub pruned: usize,
}

/// Search tree node. The arena index replaces a parent back-reference.
#[derive(Debug, Clone, Copy)]
struct Node {
    parent: Option<usize>,
    action: Option<usize>,
    cost: f32,
}

/// One level of the explicit DFS stack: the node being expanded, its full state snapshot, the
/// actions still available below it, and how far through them we are.
struct Frame<E: Effect> {
    node: usize,
    state: FactSet<E>,
    remaining: Vec<usize>,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan<E: Effect>(
        &self,
        facts: &FactSet<E>,
        catalog: &[ActionRef<E>],
        goal: &Goal<E>,
    ) -> Result<Plan<E>, PlanError> {
        self.plan_with_stats(facts, catalog, goal).0
    }

    /// Depth-first search over orderings of distinct catalog actions.
    ///
    /// Children are visited in catalog order, so among equal-cost goal nodes the first one found
    /// wins and the result is a pure function of `(facts, catalog, goal)`. A goal node is never
    /// expanded further. A child whose cumulative cost is already `>=` the best goal cost is
    /// skipped: costs are non-negative, so nothing below it can be strictly cheaper.
    pub fn plan_with_stats<E: Effect>(
        &self,
        facts: &FactSet<E>,
        catalog: &[ActionRef<E>],
        goal: &Goal<E>,
    ) -> (Result<Plan<E>, PlanError>, SearchStats) {
        let mut stats = SearchStats::default();

        if goal.is_satisfied(facts) {
            return (Ok(Plan::empty()), stats);
        }

        let mut arena = vec![Node {
            parent: None,
            action: None,
            cost: 0.0,
        }];
        let mut stack = vec![Frame {
            node: 0,
            state: facts.clone(),
            remaining: (0..catalog.len()).collect(),
            cursor: 0,
        }];
        let mut best: Option<(usize, f32)> = None;

        while let Some(frame) = stack.last_mut() {
            let Some(&action_idx) = frame.remaining.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            let action = &catalog[action_idx];
            if !action.is_achievable(&frame.state) {
                continue;
            }

            let cost = arena[frame.node].cost + action.cost;
            if best.is_some_and(|(_, best_cost)| cost >= best_cost) {
                stats.pruned += 1;
                continue;
            }

            stats.expansions += 1;
            if let Some(max) = self.config.max_expansions {
                if stats.expansions > max {
                    return (Err(PlanError::BudgetExhausted { max }), stats);
                }
            }

            let state = frame.state.union(&action.after_effects);
            arena.push(Node {
                parent: Some(frame.node),
                action: Some(action_idx),
                cost,
            });
            let node = arena.len() - 1;

            if goal.is_satisfied(&state) {
                best = Some((node, cost));
                stats.improvements += 1;
                continue;
            }

            // R' = R \ {a}, by catalog identity.
            let remaining = frame
                .remaining
                .iter()
                .copied()
                .filter(|&j| !same_action(&catalog[j], action))
                .collect();
            stack.push(Frame {
                node,
                state,
                remaining,
                cursor: 0,
            });
        }

        let Some((leaf, cost)) = best else {
            return (Err(PlanError::NoPlan), stats);
        };

        let mut steps = Vec::new();
        let mut cursor = Some(leaf);
        while let Some(idx) = cursor {
            let node = arena[idx];
            if let Some(action_idx) = node.action {
                steps.push(catalog[action_idx].clone());
            }
            cursor = node.parent;
        }
        steps.reverse();

        (Ok(Plan { steps, cost }), stats)
    }
}
