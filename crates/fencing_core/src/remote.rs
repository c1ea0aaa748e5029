//! Remote Dispatcher
//!
//! The single writer of the match state. User actions and timer firings both
//! funnel through here; after each state change the scheduler is re-synced,
//! the tutorial (if any) is re-judged and subscribers are notified.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::action::Action;
use crate::click::{ClickDisambiguator, ClickKind};
use crate::clock::{ClockScheduler, SystemClock, TimeSource, TimerKind};
use crate::config::RemoteConfig;
use crate::error::{CoreError, Result};
use crate::state::{MatchState, Side};
use crate::tutorial::{scenarios, ConditionEvaluator, Scenario, TutorialSession};

type Subscriber = Box<dyn FnMut(&MatchState) + Send + Sync>;

/// Handle returned by [`Remote::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A remote shared between threads; every transition takes the write lock.
pub type SharedRemote<C = SystemClock> = Arc<RwLock<Remote<C>>>;

pub struct Remote<C: TimeSource = SystemClock> {
    config: RemoteConfig,
    clock: C,
    state: MatchState,
    scheduler: ClockScheduler,
    set_clicks: ClickDisambiguator,
    rng: ChaCha8Rng,
    evaluator: ConditionEvaluator,
    tutorial: Option<TutorialSession>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Remote<SystemClock> {
    /// Remote on the wall clock, configured from the environment.
    pub fn from_env() -> Result<Self> {
        let config = RemoteConfig::from_env()?;
        Self::with_config(config, SystemClock::new())
    }
}

impl<C: TimeSource> Remote<C> {
    pub fn new(clock: C) -> Self {
        Self::build(RemoteConfig::default(), clock)
    }

    pub fn with_config(config: RemoteConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, clock))
    }

    fn build(config: RemoteConfig, clock: C) -> Self {
        let seed = config.priority_seed.unwrap_or_else(rand::random);
        Self {
            state: MatchState::new(config.bout_secs),
            scheduler: ClockScheduler::new(config.tick()),
            set_clicks: ClickDisambiguator::new(config.double_click_window()),
            rng: ChaCha8Rng::seed_from_u64(seed),
            evaluator: ConditionEvaluator::new(),
            tutorial: None,
            subscribers: Vec::new(),
            next_subscription: 1,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &ClockScheduler {
        &self.scheduler
    }

    pub fn evaluator(&self) -> &ConditionEvaluator {
        &self.evaluator
    }

    /// Register custom tutorial conditions here before starting a scenario.
    pub fn evaluator_mut(&mut self) -> &mut ConditionEvaluator {
        &mut self.evaluator
    }

    pub fn tutorial(&self) -> Option<&TutorialSession> {
        self.tutorial.as_ref()
    }

    /// Fire every timer due by now, in deadline order. Returns the number of
    /// firings applied.
    ///
    /// The countdown is never armed during a pause, so at this level the two
    /// timers do not interleave; the cross-timer ordering itself is exercised
    /// in the scheduler tests.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(firing) = self.scheduler.next_due(now) {
            let next = match firing.kind {
                TimerKind::Countdown => {
                    let next = self.state.countdown_tick();
                    if self.state.is_running() && !next.is_running() {
                        log::info!("Clock reached 0:00, stopped at {:?}", firing.at);
                    }
                    next
                }
                TimerKind::Pause => {
                    let next = self.state.pause_tick(self.config.bout_secs);
                    if !next.pause_active() {
                        log::info!(
                            "Pause expired at {:?}, clock reloaded, match count {} -> {}",
                            firing.at,
                            self.state.match_count(),
                            next.match_count()
                        );
                    }
                    next
                }
            };
            log::debug!("{:?} timer {:?} fired at {:?}", firing.kind, firing.id, firing.at);

            self.scheduler.sync(&next, firing.at);
            self.commit(next);
            fired += 1;
        }

        fired
    }

    /// Apply one user action. Timers that fell due before the action are
    /// applied first.
    pub fn dispatch(&mut self, action: Action) -> &MatchState {
        self.poll();
        let now = self.clock.now();

        let next = match action {
            Action::StartStop => self.state.start_stop(),
            Action::Pause => {
                self.scheduler.arm_pause(now);
                self.state.begin_pause(self.config.pause_secs)
            }
            Action::AddPoint { side } => self.state.add_point(side),
            Action::RemovePoint { side } => self.state.remove_point(side),
            Action::ResetScores => self.state.reset_scores(),
            Action::Set => match self.set_clicks.classify(now) {
                ClickKind::Single => self.state.set_clock(self.config.bout_secs),
                ClickKind::Double => self.state.set_clock(self.config.short_bout_secs),
            },
            Action::ToggleCard { side, color } => self.state.toggle_card(side, color),
            Action::CycleMatchCount => self.state.cycle_match_count(),
            Action::PriorityManual => self.state.cycle_priority(),
            Action::PriorityRandom => {
                let rng = &mut self.rng;
                self.state.toggle_random_priority(|| draw_side(rng))
            }
        };
        log::debug!("{} at {:?}: {:?}", action.name(), now, next);

        self.scheduler.sync(&next, now);
        self.commit(next);
        &self.state
    }

    /// Enter a tutorial: the state is replaced by defaults plus the
    /// scenario's overrides.
    pub fn start_tutorial(&mut self, scenario: Scenario) -> Result<()> {
        scenario.validate(self.config.bout_secs)?;
        for step in &scenario.steps {
            let mut names = Vec::new();
            step.condition.custom_names(&mut names);
            if let Some(missing) = names.iter().find(|n| !self.evaluator.has_custom_evaluator(n)) {
                return Err(CoreError::InvalidScenario(format!(
                    "step {} uses unregistered condition {}",
                    step.id, missing
                )));
            }
        }

        log::info!("Starting tutorial '{}'", scenario.id);
        let seeded = MatchState::with_overrides(self.config.bout_secs, &scenario.initial_state);
        self.tutorial = Some(TutorialSession::new(scenario));
        self.replace_state(seeded);
        Ok(())
    }

    pub fn start_tutorial_by_id(&mut self, id: &str) -> Result<()> {
        let scenario = scenarios::build(id, self.config.bout_secs)
            .ok_or_else(|| CoreError::UnknownScenario(id.to_string()))?;
        self.start_tutorial(scenario)
    }

    /// Leave the tutorial and return to the fixed default state.
    pub fn exit_tutorial(&mut self) {
        if let Some(session) = self.tutorial.take() {
            log::info!("Exiting tutorial '{}'", session.scenario().id);
        }
        self.replace_state(MatchState::new(self.config.bout_secs));
    }

    /// Call `f` after every state change until unsubscribed.
    pub fn subscribe<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&MatchState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn into_shared(self) -> SharedRemote<C> {
        Arc::new(RwLock::new(self))
    }

    /// Time until the next timer falls due, if any is armed.
    pub fn next_deadline_in(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.scheduler
            .countdown()
            .into_iter()
            .chain(self.scheduler.pause())
            .map(|h| h.deadline.saturating_sub(now))
            .min()
    }

    /// Swap in a whole new state: timers and click history start over.
    fn replace_state(&mut self, next: MatchState) {
        let now = self.clock.now();
        self.scheduler.cancel_all();
        self.set_clicks.reset();
        self.state = next;
        self.scheduler.sync(&self.state, now);
        self.after_change();
    }

    fn commit(&mut self, next: MatchState) {
        debug_assert!(next.is_consistent(self.config.bout_secs), "inconsistent state {next:?}");
        if next == self.state {
            return;
        }
        self.state = next;
        self.after_change();
    }

    fn after_change(&mut self) {
        if let Some(session) = self.tutorial.as_mut() {
            session.recompute(&self.state, &self.evaluator);
            if session.is_complete() {
                log::info!("Tutorial '{}' complete", session.scenario().id);
            }
        }
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }
}

fn draw_side(rng: &mut ChaCha8Rng) -> Side {
    if rng.gen_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    }
}
