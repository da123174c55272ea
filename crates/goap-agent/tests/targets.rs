mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{run, start, Fact, ToyWorld};
use goap_agent::{Agent, AgentPhase};
use goap_core::{Action, Catalog, Goal, TargetSpec};
use goap_nav::Vec3;
use goap_tools::Tracer;

fn drink_catalog() -> Catalog<Fact> {
    Catalog::new(
        vec![Action::new("drink")
            .with_target(TargetSpec::known("water"))
            .with_duration(1.0)
            .produces([Fact::Quenched])],
        vec![Goal::new(Fact::Quenched, 1)],
    )
    .unwrap()
}

fn graze_catalog() -> Catalog<Fact> {
    Catalog::new(
        vec![Action::new("graze")
            .with_target(TargetSpec::new("plant"))
            .with_duration(1.0)
            .produces([Fact::Sated])],
        vec![Goal::new(Fact::Sated, 1)],
    )
    .unwrap()
}

#[test]
fn known_target_is_located_walked_to_and_used() {
    let mut world = ToyWorld::new()
        .with_agent(1, Vec3::ZERO)
        .with_thing(7, "water", Vec3::ground(10.0, 0.0));
    let mut agent = Agent::new(1, &drink_catalog()).with_tracer(Tracer::new().with_log());
    let targets = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&targets);
    agent.subscribe(move |_, started| seen.borrow_mut().push(started.target));
    let mut ctx = start();

    run(&mut agent, &mut world, &mut ctx, 1);
    assert_eq!(agent.target(), Some(7));
    assert_eq!(agent.destination(), Some(Vec3::ground(10.0, 0.0)));
    assert_eq!(agent.phase(), AgentPhase::AcquiringTarget);
    assert_eq!(world.positions[&1], Vec3::ground(5.0, 0.0));

    run(&mut agent, &mut world, &mut ctx, 1);
    assert!(targets.borrow().is_empty());

    run(&mut agent, &mut world, &mut ctx, 1);
    assert_eq!(*targets.borrow(), vec![Some(7)]);
    assert_eq!(agent.phase(), AgentPhase::Executing);
    assert!(world.halted.contains(&1));

    run(&mut agent, &mut world, &mut ctx, 1);
    assert!(agent.facts().contains(Fact::Quenched));
    assert!(agent.target().is_none());

    let log = agent.trace_log().unwrap();
    assert_eq!(log.count("goap.target.lookup"), 1);
    assert_eq!(log.count("goap.action.exec"), 1);
    assert_eq!(log.count("goap.action.done"), 1);
}

#[test]
fn missing_known_target_falls_back_to_exploration() {
    let mut world = ToyWorld::new().with_agent(1, Vec3::ZERO);
    world.no_locator = true;
    let mut agent = Agent::new(1, &drink_catalog()).with_tracer(Tracer::new().with_log());
    let mut ctx = start();

    run(&mut agent, &mut world, &mut ctx, 1);

    assert!(agent.target().is_none());
    assert!(agent.destination().is_some());
    assert_eq!(agent.sought_tag(), Some("water"));
    assert_eq!(agent.trace_log().unwrap().count("goap.search"), 1);
}

#[test]
fn sensed_entity_becomes_the_target() {
    let plant = Vec3::ground(20.0, 0.0);
    let mut world = ToyWorld::new()
        .with_agent(1, Vec3::ZERO)
        .with_thing(3, "plant", plant)
        .with_thing(4, "rock", Vec3::ground(1.0, 1.0));
    let mut agent = Agent::new(1, &graze_catalog());
    let mut ctx = start();

    run(&mut agent, &mut world, &mut ctx, 1);
    assert_eq!(agent.sought_tag(), Some("plant"));
    assert!(agent.target().is_none());

    assert!(!agent.on_sensed(&mut world, 4, "rock"));
    assert!(agent.on_sensed(&mut world, 3, "plant"));
    assert_eq!(agent.target(), Some(3));
    assert_eq!(agent.destination(), Some(plant));
    assert_eq!(world.destinations[&1], plant);

    // Already has a target.
    assert_eq!(agent.sought_tag(), None);
    assert!(!agent.on_sensed(&mut world, 3, "plant"));

    run(&mut agent, &mut world, &mut ctx, 10);
    assert!(agent.facts().contains(Fact::Sated));
}

#[test]
fn exploration_is_reproducible_for_a_seed() {
    let destination = |seed: u64| {
        let mut world = ToyWorld::new().with_agent(1, Vec3::ZERO);
        let mut agent = Agent::new(1, &graze_catalog());
        let mut ctx = goap_core::TickContext::new(0, 1.0, seed);
        run(&mut agent, &mut world, &mut ctx, 1);
        agent.destination()
    };

    let first = destination(42);
    assert!(first.is_some());
    assert_eq!(first, destination(42));
}

#[test]
fn exploration_points_stay_within_the_search_radius() {
    let mut world = ToyWorld::new().with_agent(1, Vec3::ZERO);
    world.frozen = true;
    let mut agent = Agent::new(1, &graze_catalog());
    let radius = agent.config().search_radius;
    let mut ctx = start();

    for _ in 0..20 {
        run(&mut agent, &mut world, &mut ctx, 1);
        if let Some(dest) = agent.destination() {
            assert!(dest.distance(Vec3::ZERO) <= radius + 1e-3);
        }
    }
}
