use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use hbfs_core::{ActionSequence, DeterministicRng, Snapshot, TickContext, TimeBudget};
use hbfs_search::{probe_forward_model, Search, SearchError};
use hbfs_tools::{tags, NullTraceSink, TraceEvent, TraceSink};

use crate::config::PlannerConfig;
use crate::error::ControllerError;
use crate::stats::EpisodeStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// A search is live and expanded while each tick's budget allows.
    Planning,
    /// A plan is being executed one action per tick.
    Acting,
    /// The last plan was executed and the search released.
    Idle,
    /// Planning stopped abnormally (empty frontier, recovered panic).
    Other,
}

/// Interleaves a resumable [`Search`] with plan execution, one decision per tick.
///
/// Every call to [`HbfsController::act`] returns exactly one action. Planning ticks return the
/// snapshot's no-op action; the first planned action is emitted on the tick after the plan was
/// produced.
pub struct HbfsController<S: Snapshot> {
    config: PlannerConfig,
    state: ControllerState,
    search: Option<Search<S>>,
    plan: Option<ActionSequence<S::Action>>,
    trace: Box<dyn TraceSink>,
    episode: u64,
    stats: EpisodeStats,
}

impl<S: Snapshot> HbfsController<S> {
    /// An idle controller. The first [`act`](Self::act) on a live snapshot starts planning.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            state: ControllerState::Idle,
            search: None,
            plan: None,
            trace: Box::new(NullTraceSink),
            episode: 0,
            stats: EpisodeStats::default(),
        }
    }

    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace = Box::new(sink);
        self
    }

    /// Construct a controller and spend the construction budget planning for `snapshot`.
    pub fn start<B: TimeBudget>(
        config: PlannerConfig,
        ctx: &TickContext,
        snapshot: &S,
        budget: B,
    ) -> Result<Self, ControllerError> {
        let mut controller = Self::new(config);
        controller.begin_episode(ctx, snapshot, budget)?;
        Ok(controller)
    }

    /// Initialize a fresh search and run one planning burst against the initialization margin.
    ///
    /// No plan is adopted here; a solution found during the burst is picked up by the next
    /// [`act`](Self::act).
    pub fn begin_episode<B: TimeBudget>(
        &mut self,
        ctx: &TickContext,
        snapshot: &S,
        budget: B,
    ) -> Result<(), ControllerError> {
        self.initialize(ctx.tick, snapshot)?;
        let margin = self.config.init_margin();
        self.run_burst(ctx.tick, &budget, margin)
    }

    /// Decide the action for this tick.
    ///
    /// Only fatal conditions are returned as errors; starvation, timeouts and recovered panics are
    /// absorbed into the fallback behaviors and show up in [`stats`](Self::stats).
    pub fn act<B: TimeBudget>(
        &mut self,
        ctx: &TickContext,
        snapshot: &S,
        budget: B,
    ) -> Result<S::Action, ControllerError> {
        match self.state {
            ControllerState::Acting => self.act_from_plan(ctx.tick, snapshot),
            ControllerState::Planning => self.plan_tick(ctx, snapshot, &budget),
            ControllerState::Idle | ControllerState::Other => {
                if !snapshot.is_terminal() {
                    tracing::info!(tick = ctx.tick, state = ?self.state, "episode continues; re-planning");
                    self.emit(TraceEvent::new(ctx.tick, tags::REPLAN).with_a(self.episode));
                    self.initialize(ctx.tick, snapshot)?;
                }
                Ok(snapshot.noop_action())
            }
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn search(&self) -> Option<&Search<S>> {
        self.search.as_ref()
    }

    /// Remaining actions of the plan being executed.
    pub fn plan(&self) -> Option<&ActionSequence<S::Action>> {
        self.plan.as_ref()
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    /// Number of searches initialized so far.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    fn emit(&mut self, event: TraceEvent) {
        self.trace.emit(event);
    }

    fn initialize(&mut self, tick: u64, snapshot: &S) -> Result<(), ControllerError> {
        self.search = None;
        self.plan = None;
        self.state = ControllerState::Other;

        self.config
            .validate()
            .map_err(|err| ControllerError::InvalidConfig(err.to_string()))?;
        let search = Search::new(self.config.search, snapshot).map_err(|err| match err {
            SearchError::InvalidInitialState => ControllerError::InvalidInitialState,
            other => ControllerError::Search(other),
        })?;

        if self.config.probe_forward_model {
            for probe in probe_forward_model(snapshot, search.actions()) {
                tracing::debug!(
                    action = ?probe.action,
                    moves_on_first = probe.moves_on_first,
                    moves_on_repeat = probe.moves_on_repeat,
                    "forward model probe"
                );
            }
        }

        self.episode += 1;
        self.stats.episodes_initialized += 1;
        self.stats.search = *search.stats();
        self.stats.last_turnaround = 0;

        let actions = search.actions().len() as u64;
        tracing::info!(
            tick,
            episode = self.episode,
            actions,
            root_load = search.heuristic().root_load(),
            "search initialized"
        );
        self.emit(TraceEvent::new(tick, tags::INIT).with_a(self.episode).with_b(actions));

        self.search = Some(search);
        self.state = ControllerState::Planning;
        Ok(())
    }

    /// Release the search and any plan.
    fn teardown(&mut self, tick: u64) {
        let expansions = self.stats.search.expansions;
        self.search = None;
        self.plan = None;
        self.emit(TraceEvent::new(tick, tags::TEARDOWN).with_a(self.episode).with_b(expansions));
    }

    fn act_from_plan(&mut self, tick: u64, snapshot: &S) -> Result<S::Action, ControllerError> {
        let Some(plan) = self.plan.as_mut() else {
            return Err(ControllerError::IllegalState("acting without a plan"));
        };
        if let Some(action) = plan.pop_next() {
            return Ok(action);
        }

        tracing::info!(tick, "plan exhausted; releasing search");
        self.teardown(tick);
        self.state = ControllerState::Idle;
        Ok(snapshot.noop_action())
    }

    fn plan_tick<B: TimeBudget>(
        &mut self,
        ctx: &TickContext,
        snapshot: &S,
        budget: &B,
    ) -> Result<S::Action, ControllerError> {
        if self.search.is_none() {
            return Err(ControllerError::IllegalState("planning without a search"));
        }
        self.stats.planning_ticks += 1;

        let every = self.config.report_every;
        if every > 0 && ctx.tick % every == 1 {
            self.report(ctx.tick);
        }

        let margin = self.config.action_margin();
        self.run_burst(ctx.tick, budget, margin)?;
        if self.state == ControllerState::Planning {
            self.conclude_tick(ctx, snapshot);
        }
        Ok(snapshot.noop_action())
    }

    /// Expand until the budget no longer exceeds `margin` or a solution is found. A search that
    /// already holds a solution is left alone.
    ///
    /// A panic raised by the environment while expanding tears the search down and leaves the
    /// controller in [`ControllerState::Other`], from which the next tick re-plans.
    fn run_burst<B: TimeBudget>(
        &mut self,
        tick: u64,
        budget: &B,
        margin: Duration,
    ) -> Result<(), ControllerError> {
        let Some(search) = self.search.as_mut() else {
            return Err(ControllerError::IllegalState("planning without a search"));
        };
        if search.is_solved() {
            self.stats.last_turnaround = 0;
            return Ok(());
        }

        let burst = catch_unwind(AssertUnwindSafe(|| {
            let mut expansions = 0u64;
            while budget.exceeds(margin) {
                match search.expand() {
                    Ok(status) => {
                        expansions += 1;
                        if status.is_solved() {
                            break;
                        }
                    }
                    Err(err) => return (expansions, Err(err)),
                }
            }
            (expansions, Ok(()))
        }));

        let (expansions, outcome) = match burst {
            Ok(done) => done,
            Err(payload) => {
                self.stats.recovered_panics += 1;
                tracing::warn!(tick, panic = panic_message(payload.as_ref()), "planning panicked; search discarded");
                self.emit(TraceEvent::new(tick, tags::PANIC).with_a(self.stats.recovered_panics));
                self.teardown(tick);
                self.state = ControllerState::Other;
                return Ok(());
            }
        };

        self.stats.last_turnaround = expansions;
        if let Some(search) = &self.search {
            self.stats.search = *search.stats();
        }

        if let Err(err) = outcome {
            tracing::warn!(tick, error = %err, "planning stopped");
            self.emit(TraceEvent::new(tick, tags::FRONTIER_EMPTY).with_a(self.episode));
            self.state = ControllerState::Other;
        }
        Ok(())
    }

    /// Apply the end-of-tick stop conditions: solution, then tick ceiling, then starvation.
    fn conclude_tick(&mut self, ctx: &TickContext, snapshot: &S) {
        let tick = ctx.tick;
        let Some(search) = self.search.as_ref() else {
            return;
        };

        if let Some(plan) = search.solution_plan() {
            self.stats.solutions += 1;
            tracing::info!(
                tick,
                len = plan.len(),
                expansions = search.stats().expansions,
                "solution found; acting"
            );
            self.emit(
                TraceEvent::new(tick, tags::SOLUTION)
                    .with_a(plan.len() as u64)
                    .with_b(self.stats.search.expansions),
            );
            self.enter_acting(plan);
            return;
        }

        if tick > self.config.max_ticks {
            match search.best_effort_plan().filter(|plan| !plan.is_empty()) {
                Some(plan) => {
                    self.stats.timeouts += 1;
                    tracing::info!(tick, len = plan.len(), "tick ceiling reached; acting on best node");
                    self.emit(TraceEvent::new(tick, tags::TIMEOUT).with_a(plan.len() as u64));
                    self.enter_acting(plan);
                }
                None => {
                    tracing::warn!(tick, "tick ceiling reached with no node to act on");
                    self.emit(TraceEvent::new(tick, tags::FRONTIER_EMPTY).with_a(self.episode));
                    self.state = ControllerState::Other;
                }
            }
            return;
        }

        let starved = search.stats().empty_frontier_events;
        if starved > self.config.max_empty_frontier_events {
            let actions = search.actions();
            let mut rng = ctx.rng_for_episode(self.episode, tick);
            let action = rng
                .next_index(actions.len())
                .map(|i| actions[i])
                .unwrap_or_else(|| snapshot.noop_action());

            self.stats.random_fallbacks += 1;
            tracing::warn!(tick, starved, action = ?action, "frontier keeps starving; acting randomly");
            self.emit(TraceEvent::new(tick, tags::STARVED).with_a(u64::from(starved)));
            self.enter_acting(ActionSequence::single(action));
        }
    }

    fn enter_acting(&mut self, plan: ActionSequence<S::Action>) {
        self.plan = Some(plan);
        self.state = ControllerState::Acting;
    }

    fn report(&mut self, tick: u64) {
        let Some(search) = self.search.as_ref() else {
            return;
        };
        let frontier = search.frontier().len();
        let visited = search.visited().len();
        match search.best() {
            Some(best) => {
                let c = best.components();
                tracing::debug!(
                    tick,
                    frontier,
                    visited,
                    rejects = search.stats().rejects,
                    depth = best.depth(),
                    events = c.events,
                    event_score = c.event_score,
                    diversity_score = c.tile_diversity_score,
                    load_score = c.load_score,
                    score = best.score(),
                    turnaround = self.stats.last_turnaround,
                    "planning progress"
                );
            }
            None => tracing::debug!(tick, visited, "planning progress: frontier empty"),
        }
        self.emit(
            TraceEvent::new(tick, tags::REPORT)
                .with_a(frontier as u64)
                .with_b(visited as u64),
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
