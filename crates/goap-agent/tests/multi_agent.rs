mod common;

use common::{Fact, ToyWorld, DT};
use goap_agent::{tick_agents, Agent};
use goap_core::{Action, Catalog, Goal, TickContext};
use goap_nav::Vec3;

#[test]
fn agents_tick_in_id_order_and_keep_separate_state() {
    let catalog = Catalog::new(
        vec![Action::new("rest").with_duration(1.0).produces([Fact::Rested])],
        vec![Goal::new(Fact::Rested, 1)],
    )
    .unwrap();
    let mut world = ToyWorld::new()
        .with_agent(1, Vec3::ZERO)
        .with_agent(2, Vec3::ground(3.0, 0.0));

    let mut agents = vec![
        Agent::new(2, &catalog),
        Agent::new(1, &catalog).with_facts([Fact::Hungry]),
    ];
    for agent in agents.iter_mut() {
        agent.subscribe(|world: &mut ToyWorld, started| {
            world.log.push(format!("{}:{}", started.agent, started.action.name));
        });
    }
    agents[0].add_goal(Fact::Rested, 9, true);

    let mut ctx = TickContext::new(0, DT, 1);
    for _ in 0..2 {
        ctx = ctx.next();
        tick_agents(&ctx, &mut world, &mut agents);
    }

    assert_eq!(world.log, vec!["1:rest", "2:rest"]);
    assert_eq!(agents[0].id(), 1);
    assert!(agents.iter().all(|a| a.facts().contains(Fact::Rested)));
    assert!(agents[0].facts().contains(Fact::Hungry));
    assert!(!agents[1].facts().contains(Fact::Hungry));
    assert_eq!(agents[0].goals().len(), 1);
    assert_eq!(agents[1].goals().len(), 1);
}
