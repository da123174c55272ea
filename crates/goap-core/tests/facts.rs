use goap_core::{Action, FactSet, TargetSpec, same_action};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Fact {
    Hungry,
    Sated,
    Thirsty,
    Quenched,
}

#[test]
fn add_fact_is_idempotent() {
    let mut once = FactSet::new();
    once.insert(Fact::Hungry);

    let mut twice = FactSet::new();
    assert!(twice.insert(Fact::Hungry));
    assert!(!twice.insert(Fact::Hungry));

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 1);
}

#[test]
fn remove_fact_is_idempotent() {
    let mut facts = FactSet::from([Fact::Hungry, Fact::Thirsty]);
    assert!(facts.remove(Fact::Hungry));
    assert!(!facts.remove(Fact::Hungry));
    assert_eq!(facts, FactSet::from([Fact::Thirsty]));
}

#[test]
fn is_achievable_requires_every_precondition() {
    let eat = Action::new("eat")
        .requires([Fact::Hungry, Fact::Thirsty])
        .produces([Fact::Sated]);

    assert!(!eat.is_achievable(&FactSet::new()));
    assert!(!eat.is_achievable(&FactSet::from([Fact::Hungry])));
    assert!(eat.is_achievable(&FactSet::from([Fact::Hungry, Fact::Thirsty])));
    assert!(eat.is_achievable(&FactSet::from([
        Fact::Hungry,
        Fact::Thirsty,
        Fact::Quenched
    ])));
}

#[test]
fn action_without_preconditions_is_always_achievable() {
    let drink = Action::<Fact>::new("drink").produces([Fact::Quenched]);
    assert!(drink.is_achievable(&FactSet::new()));
}

#[test]
fn identical_actions_are_distinct_catalog_entries() {
    let a = Action::<Fact>::new("drink").produces([Fact::Quenched]).into_ref();
    let b = Action::<Fact>::new("drink").produces([Fact::Quenched]).into_ref();

    assert!(same_action(&a, &a.clone()));
    assert!(!same_action(&a, &b));
}

#[test]
fn target_accessors_reflect_target_spec() {
    let forage = Action::<Fact>::new("forage").with_target(TargetSpec::new("plant"));
    assert!(forage.has_target());
    assert_eq!(forage.target_tag(), Some("plant"));
    assert!(!forage.should_know_target());

    let drink = Action::<Fact>::new("drink").with_target(TargetSpec::known("water"));
    assert!(drink.should_know_target());

    let rest = Action::<Fact>::new("rest");
    assert!(!rest.has_target());
    assert_eq!(rest.target_tag(), None);
}
