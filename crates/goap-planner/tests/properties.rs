use goap_core::{Action, ActionRef, FactSet, Goal};
use goap_planner::Planner;
use proptest::prelude::*;

const VOCAB: u8 = 6;

fn bits(mask: u8) -> impl Iterator<Item = u8> {
    (0..VOCAB).filter(move |b| mask & (1 << b) != 0)
}

fn build_catalog(specs: &[(u8, u8, u8)]) -> Vec<ActionRef<u8>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(pre, eff, cost))| {
            Action::new(format!("a{i}"))
                .with_cost(cost as f32)
                .requires(bits(pre))
                .produces(bits(eff))
                .into_ref()
        })
        .collect()
}

/// Brute force over every ordering of distinct actions; returns the cheapest cost reaching `goal`.
fn oracle(
    state: &FactSet<u8>,
    catalog: &[ActionRef<u8>],
    used: &mut [bool],
    goal: u8,
    cost: f32,
    best: &mut Option<f32>,
) {
    if state.contains(goal) {
        *best = Some(best.map_or(cost, |b| b.min(cost)));
        return;
    }
    for (i, action) in catalog.iter().enumerate() {
        if used[i] || !action.is_achievable(state) {
            continue;
        }
        used[i] = true;
        oracle(
            &state.union(&action.after_effects),
            catalog,
            used,
            goal,
            cost + action.cost,
            best,
        );
        used[i] = false;
    }
}

proptest! {
    #[test]
    fn plans_exist_exactly_when_a_sequence_exists_and_are_optimal(
        specs in prop::collection::vec((0u8..64, 1u8..64, 0u8..5), 1..6),
        start in 0u8..64,
        goal in 0u8..VOCAB,
    ) {
        let catalog = build_catalog(&specs);
        let facts: FactSet<u8> = bits(start).collect();
        let goal = Goal::new(goal, 1);

        let mut best = None;
        let mut used = vec![false; catalog.len()];
        oracle(&facts, &catalog, &mut used, goal.target, 0.0, &mut best);

        let result = Planner::new().plan(&facts, &catalog, &goal);
        match (result, best) {
            (Ok(plan), Some(best)) => prop_assert_eq!(plan.cost, best),
            (Err(_), None) => {}
            (result, best) => prop_assert!(false, "planner {:?} vs oracle {:?}", result.map(|p| p.cost), best),
        }
    }

    #[test]
    fn plans_replay_without_repeats_and_are_deterministic(
        specs in prop::collection::vec((0u8..64, 1u8..64, 0u8..5), 1..6),
        start in 0u8..64,
        goal in 0u8..VOCAB,
    ) {
        let catalog = build_catalog(&specs);
        let facts: FactSet<u8> = bits(start).collect();
        let goal = Goal::new(goal, 1);

        let planner = Planner::new();
        let Ok(plan) = planner.plan(&facts, &catalog, &goal) else {
            return Ok(());
        };

        let mut state = facts.clone();
        let mut cost = 0.0;
        for (i, step) in plan.steps.iter().enumerate() {
            prop_assert!(step.is_achievable(&state));
            prop_assert!(!plan.steps[..i].iter().any(|prev| std::sync::Arc::ptr_eq(prev, step)));
            state.insert_all(&step.after_effects);
            cost += step.cost;
        }
        prop_assert!(goal.is_satisfied(&state));
        prop_assert_eq!(cost, plan.cost);

        let again = planner.plan(&facts, &catalog, &goal).expect("deterministic");
        prop_assert_eq!(again.names(), plan.names());
    }
}
