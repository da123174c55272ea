use goap_core::{Action, Catalog, CatalogError, Goal, TargetSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Fact {
    Thirsty,
    Quenched,
    Sated,
}

fn drink() -> Action<Fact> {
    Action::new("drink")
        .with_target(TargetSpec::known("water"))
        .with_duration(2.0)
        .requires([Fact::Thirsty])
        .produces([Fact::Quenched])
}

#[test]
fn valid_catalog_is_shared_by_reference() {
    let catalog = Catalog::new(vec![drink()], vec![Goal::new(Fact::Quenched, 1)]).expect("valid");
    let a = catalog.shared_actions();
    let b = catalog.clone().shared_actions();

    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(catalog.action("drink").map(|a| a.duration), Some(2.0));
    assert!(catalog.action("eat").is_none());
}

#[test]
fn negative_cost_is_rejected() {
    let err = Catalog::new(vec![drink().with_cost(-1.0)], vec![]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidCost {
            action: "drink".into(),
            cost: -1.0
        }
    );
}

#[test]
fn non_finite_duration_is_rejected() {
    let err = Catalog::new(vec![drink().with_duration(f32::NAN)], vec![]).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidDuration { .. }));
}

#[test]
fn empty_target_tag_is_rejected() {
    let action = Action::<Fact>::new("wander").with_target(TargetSpec::new("  "));
    let err = Catalog::new(vec![action], vec![]).unwrap_err();
    assert_eq!(err, CatalogError::EmptyTargetTag { action: "wander".into() });
}

#[test]
fn duplicate_action_names_are_rejected() {
    let err = Catalog::new(vec![drink(), drink()], vec![]).unwrap_err();
    assert_eq!(err, CatalogError::DuplicateAction("drink".into()));
}

#[test]
fn duplicate_and_unreachable_goals_are_rejected() {
    let err = Catalog::new(
        vec![drink()],
        vec![Goal::new(Fact::Quenched, 1), Goal::new(Fact::Quenched, 2)],
    )
    .unwrap_err();
    assert_eq!(err, CatalogError::DuplicateGoal("Quenched".into()));

    let err = Catalog::new(vec![drink()], vec![Goal::new(Fact::Sated, 1)]).unwrap_err();
    assert_eq!(err, CatalogError::UnreachableGoal("Sated".into()));
    assert_eq!(err.to_string(), "goal Sated is not produced by any action");
}
