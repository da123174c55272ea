use goap_core::{ActionRef, Effect, FactSet, Goal, GoalId, GoalSet};

use crate::{Plan, PlanError, Planner};

/// The goal chosen by [`Planner::select`] and the plan that achieves it.
#[derive(Debug, Clone)]
pub struct Selection<E: Effect> {
    pub goal_id: GoalId,
    pub goal: Goal<E>,
    pub plan: Plan<E>,
}

impl Planner {
    /// Plans for each goal in descending priority and returns the first success.
    ///
    /// Goals whose target already holds are skipped: they need no plan, and selecting one would
    /// starve every goal below it.
    pub fn select<E: Effect>(
        &self,
        facts: &FactSet<E>,
        catalog: &[ActionRef<E>],
        goals: &GoalSet<E>,
    ) -> Option<Selection<E>> {
        self.select_with(facts, catalog, goals, |_, _, _| {})
    }

    /// [`select`](Self::select), reporting every attempted goal, its id in `goals` and the planning
    /// result to `observe`.
    pub fn select_with<E, F>(
        &self,
        facts: &FactSet<E>,
        catalog: &[ActionRef<E>],
        goals: &GoalSet<E>,
        mut observe: F,
    ) -> Option<Selection<E>>
    where
        E: Effect,
        F: FnMut(GoalId, &Goal<E>, &Result<Plan<E>, PlanError>),
    {
        for (goal_id, goal) in goals.by_priority() {
            if goal.is_satisfied(facts) {
                continue;
            }
            let result = self.plan(facts, catalog, goal);
            observe(goal_id, goal, &result);
            if let Ok(plan) = result {
                return Some(Selection {
                    goal_id,
                    goal: *goal,
                    plan,
                });
            }
        }
        None
    }
}
