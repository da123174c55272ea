use std::collections::VecDeque;
use std::sync::Arc;

use goap_core::{
    same_action, Action, ActionRef, AgentId, Catalog, DeterministicRng, Effect, FactSet, Goal,
    GoalId, GoalSet, TickContext,
};
use goap_nav::Vec3;
use goap_planner::Planner;
use goap_tools::{TraceEvent, TraceLog, Tracer};

use crate::listener::{ActionStarted, ListenerId, Listeners};
use crate::{AgentConfig, AgentPhase, GoapWorld, StuckMonitor, Suspension};

const SEARCH_STREAM: u64 = 0x5EA2C4;

/// Planning cache key: the fact and goal revisions a planning failure was observed at.
type FailureKey = (u64, u64);

/// One GOAP-driven entity.
///
/// The agent never blocks. Timed execution is a [`Suspension`] polled against the agent's own
/// clock, which only advances while the agent is not paused.
pub struct Agent<E: Effect, W: GoapWorld> {
    id: W::Agent,
    config: AgentConfig,
    planner: Planner,
    actions: Arc<[ActionRef<E>]>,
    goals: GoalSet<E>,

    facts: FactSet<E>,
    facts_revision: u64,

    current_goal: Option<(GoalId, Goal<E>)>,
    plan: Option<VecDeque<ActionRef<E>>>,
    current_action: Option<ActionRef<E>>,
    target: Option<W::Entity>,
    destination: Option<Vec3>,

    executing: bool,
    searching: bool,
    paused: bool,

    clock: f64,
    tick: u64,
    suspension: Suspension,
    stuck: StuckMonitor,
    failed_at: Option<FailureKey>,

    listeners: Listeners<E, W>,
    tracer: Tracer,
}

impl<E: Effect, W: GoapWorld> Agent<E, W> {
    /// Creates an agent over a shared catalog. The catalog's goals seed the agent's goal set.
    pub fn new(id: W::Agent, catalog: &Catalog<E>) -> Self {
        Self {
            id,
            config: AgentConfig::default(),
            planner: Planner::new(),
            actions: catalog.shared_actions(),
            goals: catalog.goals().iter().copied().collect(),
            facts: FactSet::new(),
            facts_revision: 0,
            current_goal: None,
            plan: None,
            current_action: None,
            target: None,
            destination: None,
            executing: false,
            searching: false,
            paused: false,
            clock: 0.0,
            tick: 0,
            suspension: Suspension::default(),
            stuck: StuckMonitor::default(),
            failed_at: None,
            listeners: Listeners::default(),
            tracer: Tracer::default(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_facts(mut self, facts: impl IntoIterator<Item = E>) -> Self {
        self.facts.extend(facts);
        self.facts_revision += 1;
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn id(&self) -> W::Agent {
        self.id
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn actions(&self) -> &[ActionRef<E>] {
        &self.actions
    }

    pub fn facts(&self) -> &FactSet<E> {
        &self.facts
    }

    /// Adds a fact. Callable at any time, including mid-execution.
    pub fn add_fact(&mut self, fact: E) -> bool {
        let changed = self.facts.insert(fact);
        if changed {
            self.facts_revision += 1;
        }
        changed
    }

    pub fn remove_fact(&mut self, fact: E) -> bool {
        let changed = self.facts.remove(fact);
        if changed {
            self.facts_revision += 1;
        }
        changed
    }

    pub fn goals(&self) -> &GoalSet<E> {
        &self.goals
    }

    pub fn add_goal(&mut self, target: E, priority: i32, removable: bool) -> GoalId {
        self.goals.push(Goal {
            target,
            priority,
            removable,
        })
    }

    pub fn current_goal(&self) -> Option<E> {
        self.current_goal.map(|(_, goal)| goal.target)
    }

    pub fn current_action(&self) -> Option<&Action<E>> {
        self.current_action.as_deref()
    }

    /// Actions still queued after the current one.
    pub fn remaining_plan(&self) -> impl Iterator<Item = &Action<E>> + '_ {
        self.plan.iter().flatten().map(|a| a.as_ref())
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    pub fn target(&self) -> Option<W::Entity> {
        self.target
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// `true` while waiting out the current action's duration.
    pub fn is_suspended(&self) -> bool {
        self.suspension.is_pending()
    }

    /// Seconds of agent time elapsed while unpaused.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn stuck_elapsed(&self) -> f32 {
        self.stuck.elapsed()
    }

    pub fn phase(&self) -> AgentPhase {
        if self.paused {
            return AgentPhase::Paused;
        }
        if self.suspension.is_pending() {
            return AgentPhase::Executing;
        }
        match &self.current_action {
            Some(action) if action.has_target() => AgentPhase::AcquiringTarget,
            Some(_) => AgentPhase::Executing,
            None if self.plan.as_ref().is_some_and(|p| !p.is_empty()) => AgentPhase::Queued,
            None => AgentPhase::Idle,
        }
    }

    /// The tag a sensing trigger should report, if the agent is looking for a target right now.
    pub fn sought_tag(&self) -> Option<&str> {
        if self.paused || self.target.is_some() || self.suspension.is_pending() {
            return None;
        }
        self.current_action.as_ref()?.target_tag()
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&mut W, &ActionStarted<'_, E, W>) + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.tracer.log()
    }

    /// Drops the current goal, plan and action. A pending timed completion never fires.
    pub fn cancel_current_goal(&mut self, world: &mut W) {
        tracing::debug!(
            agent = ?self.id,
            goal = ?self.current_goal(),
            action = self.current_action.as_ref().map(|a| a.name.as_str()),
            "cancelling current goal"
        );
        self.abort(world);
        self.trace(TraceEvent::new(self.tick, "goap.cancel"));
    }

    /// Pausing halts navigation and freezes the agent clock; unpausing resumes both.
    pub fn pause(&mut self, world: &mut W, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            world.halt(self.id);
        } else if !self.suspension.is_pending() {
            world.resume(self.id);
        }
        tracing::debug!(agent = ?self.id, paused, "pause toggled");
    }

    /// Sensing trigger: `entity` carrying `tag` entered the agent's sensing range.
    ///
    /// Acquires it as the target when the current action seeks that tag and has no target yet.
    pub fn on_sensed(&mut self, world: &mut W, entity: W::Entity, tag: &str) -> bool {
        if self.sought_tag() != Some(tag) {
            return false;
        }
        let Some(from) = world.position(self.id) else {
            return false;
        };
        let Some(point) = world.closest_point(entity, from) else {
            return false;
        };
        tracing::debug!(agent = ?self.id, ?entity, tag, "target sensed");
        self.acquire(world, entity, point);
        let action = self.action_index();
        self.trace(TraceEvent::new(self.tick, "goap.target.sensed").with_a(action));
        true
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        self.tick = ctx.tick;
        if self.paused {
            return;
        }
        self.clock += f64::from(ctx.dt_seconds.max(0.0));

        if self.suspension.poll(self.clock) {
            self.complete_action(world);
        }

        self.check_stuck(ctx, world);

        if self.plan.is_none() && !self.executing {
            self.plan_next();
        }

        if !self.executing {
            self.start_next_action(world);
        }

        if self.executing && !self.suspension.is_pending() {
            self.pursue(ctx, world);
        }
    }

    fn plan_next(&mut self) {
        if self.goals.is_empty() {
            return;
        }
        let key = (self.facts_revision, self.goals.revision());
        if self.config.cache_failed_plans && self.failed_at == Some(key) {
            self.trace(TraceEvent::new(self.tick, "goap.plan.skip"));
            return;
        }

        let tick = self.tick;
        let tracer = &mut self.tracer;
        let selection =
            self.planner
                .select_with(&self.facts, &self.actions, &self.goals, |goal_id, _, result| {
                    tracer.emit(TraceEvent::new(tick, "goap.plan.call").with_a(goal_id.0));
                    let steps = result.as_ref().map_or(0, |p| p.len() as u64);
                    tracer.emit(
                        TraceEvent::new(tick, "goap.plan.result")
                            .with_a(steps)
                            .with_b(u64::from(result.is_ok())),
                    );
                });

        let Some(selection) = selection else {
            tracing::debug!(agent = ?self.id, goals = self.goals.len(), "no achievable goal");
            self.failed_at = Some(key);
            self.trace(TraceEvent::new(tick, "goap.plan.none"));
            return;
        };

        tracing::debug!(
            agent = ?self.id,
            goal = ?selection.goal.target,
            steps = ?selection.plan.names(),
            cost = selection.plan.cost,
            "plan selected"
        );
        self.failed_at = None;
        self.current_goal = Some((selection.goal_id, selection.goal));
        self.plan = Some(selection.plan.into_queue());
    }

    fn start_next_action(&mut self, world: &mut W) {
        let Some(plan) = self.plan.as_mut() else {
            return;
        };
        let Some(action) = plan.pop_front() else {
            self.plan = None;
            self.current_goal = None;
            return;
        };

        if self.config.revalidate_preconditions && !action.is_achievable(&self.facts) {
            tracing::warn!(
                agent = ?self.id,
                action = %action.name,
                "preconditions no longer hold; replanning"
            );
            let index = self.index_of(&action);
            self.plan = None;
            self.current_goal = None;
            self.trace(TraceEvent::new(self.tick, "goap.stale_action").with_a(index));
            return;
        }

        tracing::debug!(agent = ?self.id, action = %action.name, "action started");
        let index = self.index_of(&action);
        self.current_action = Some(action.clone());
        self.executing = true;
        self.searching = false;
        self.target = None;
        self.destination = None;
        self.trace(TraceEvent::new(self.tick, "goap.action.start").with_a(index));

        if action.should_know_target() {
            self.lookup_target(world, &action);
        }
    }

    fn lookup_target(&mut self, world: &mut W, action: &Action<E>) {
        let Some(tag) = action.target_tag() else {
            return;
        };
        let found = world.find_by_tag(self.id, tag);
        self.trace(
            TraceEvent::new(self.tick, "goap.target.lookup").with_b(u64::from(found.is_some())),
        );
        let Some(entity) = found else {
            tracing::debug!(agent = ?self.id, tag, "no entity with tag; exploring");
            return;
        };
        let Some(from) = world.position(self.id) else {
            return;
        };
        let Some(point) = world.closest_point(entity, from) else {
            return;
        };
        if !world.can_reach(self.id, point) {
            tracing::debug!(agent = ?self.id, tag, ?entity, "known target unreachable; exploring");
            return;
        }
        self.acquire(world, entity, point);
    }

    fn acquire(&mut self, world: &mut W, entity: W::Entity, point: Vec3) {
        self.target = Some(entity);
        self.searching = false;
        self.destination = Some(point);
        world.move_to(self.id, point);
    }

    fn pursue(&mut self, ctx: &TickContext, world: &mut W) {
        let Some(action) = self.current_action.clone() else {
            return;
        };
        if !action.has_target() {
            self.begin_timed(world, &action);
            return;
        }

        if self.target.is_none() && !self.searching {
            self.explore(ctx, world);
        }

        let (Some(destination), Some(position)) = (self.destination, world.position(self.id))
        else {
            return;
        };
        if position.distance(destination) >= self.config.arrival_distance {
            return;
        }

        self.searching = false;
        if self.target.is_some() {
            self.begin_timed(world, &action);
        }
    }

    /// Picks a random reachable point within `search_radius` and walks there.
    fn explore(&mut self, ctx: &TickContext, world: &mut W) {
        let Some(origin) = world.position(self.id) else {
            return;
        };
        let radius = self.config.search_radius;
        let mut rng = ctx.rng_for_agent(self.id, SEARCH_STREAM);

        for _ in 0..self.config.max_search_samples {
            let offset = Vec3::from(rng.next_in_unit_ball()) * radius;
            let Some(point) = world.sample_position(origin + offset, radius) else {
                continue;
            };
            if !world.can_reach(self.id, point) {
                continue;
            }
            self.searching = true;
            self.destination = Some(point);
            world.move_to(self.id, point);
            self.trace(TraceEvent::new(self.tick, "goap.search").with_b(1));
            return;
        }

        tracing::trace!(agent = ?self.id, "no reachable search point this tick");
        self.trace(TraceEvent::new(self.tick, "goap.search"));
    }

    fn begin_timed(&mut self, world: &mut W, action: &ActionRef<E>) {
        world.halt(self.id);
        self.searching = false;

        let event = ActionStarted {
            agent: self.id,
            action: action.as_ref(),
            target: self.target,
            after_effects: &action.after_effects,
        };
        self.listeners.notify(world, &event);

        self.suspension.schedule(self.clock, action.duration);
        self.stuck.reset(world.position(self.id));

        tracing::debug!(
            agent = ?self.id,
            action = %action.name,
            duration = action.duration,
            target = ?self.target,
            "executing"
        );
        let index = self.index_of(action);
        self.trace(TraceEvent::new(self.tick, "goap.action.exec").with_a(index));
    }

    fn complete_action(&mut self, world: &mut W) {
        let Some(action) = self.current_action.take() else {
            self.executing = false;
            return;
        };

        // Preconditions are consumed before effects land, so an action may re-produce its own
        // precondition.
        let mut changed = false;
        for fact in action.preconditions.iter() {
            changed |= self.facts.remove(fact);
        }
        for fact in action.after_effects.iter() {
            changed |= self.facts.insert(fact);
        }
        if changed {
            self.facts_revision += 1;
        }

        tracing::debug!(agent = ?self.id, action = %action.name, "action complete");
        let index = self.index_of(&action);
        self.trace(TraceEvent::new(self.tick, "goap.action.done").with_a(index));

        if let Some((goal_id, goal)) = self.current_goal {
            if goal.is_satisfied(&self.facts) {
                tracing::info!(agent = ?self.id, goal = ?goal.target, "goal achieved");
                self.trace(
                    TraceEvent::new(self.tick, "goap.goal.done").with_b(u64::from(goal.removable)),
                );
                if goal.removable {
                    self.goals.remove(goal_id);
                }
            }
        }

        if self.plan.as_ref().is_none_or(|p| p.is_empty()) {
            self.plan = None;
            self.current_goal = None;
        }

        self.executing = false;
        self.searching = false;
        self.target = None;
        self.destination = None;
        world.resume(self.id);
        self.stuck.reset(world.position(self.id));
    }

    fn check_stuck(&mut self, ctx: &TickContext, world: &mut W) {
        let Some(position) = world.position(self.id) else {
            return;
        };
        let elapsed = self
            .stuck
            .observe(position, ctx.dt_seconds, self.config.stuck_tolerance);
        if self.suspension.is_pending() {
            return;
        }

        let threshold = StuckMonitor::threshold_for(
            self.config.stuck_threshold_seconds,
            self.current_action.as_ref().map(|a| a.duration),
        );
        if elapsed <= threshold {
            return;
        }

        if self.current_goal.is_none() && self.plan.is_none() && self.current_action.is_none() {
            self.stuck.reset(Some(position));
            return;
        }

        tracing::warn!(
            agent = ?self.id,
            elapsed,
            goal = ?self.current_goal(),
            action = self.current_action.as_ref().map(|a| a.name.as_str()),
            "agent stuck; abandoning goal"
        );
        self.abort(world);
        self.stuck.reset(Some(position));
        self.trace(TraceEvent::new(self.tick, "goap.stuck"));
    }

    fn abort(&mut self, world: &mut W) {
        self.suspension.cancel();
        self.current_goal = None;
        self.plan = None;
        self.current_action = None;
        self.target = None;
        self.destination = None;
        self.executing = false;
        self.searching = false;
        self.failed_at = None;
        if !self.paused {
            world.resume(self.id);
        }
    }

    fn index_of(&self, action: &ActionRef<E>) -> u64 {
        self.actions
            .iter()
            .position(|a| same_action(a, action))
            .map_or(u64::MAX, |i| i as u64)
    }

    fn action_index(&self) -> u64 {
        self.current_action
            .as_ref()
            .map_or(u64::MAX, |a| self.index_of(a))
    }

    fn trace(&mut self, event: TraceEvent) {
        self.tracer.emit(event);
    }
}

impl<E: Effect, W: GoapWorld> core::fmt::Debug for Agent<E, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id.stable_id())
            .field("phase", &self.phase())
            .field("goal", &self.current_goal())
            .field("action", &self.current_action.as_ref().map(|a| &a.name))
            .field("facts", &self.facts)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
