//! Cooperative step scheduler
//!
//! Drives one [`StepProducer`] at a time and hands every Step to an observer,
//! pacing delivery by a configurable delay. Nothing here blocks: the host
//! calls [`Scheduler::tick`] from its own event loop (the TUI polls on a short
//! interval) and each tick delivers at most one Step. Pause and stop are
//! therefore seen on the very next tick, even in the middle of a long delay.
//!
//! ```text
//! Idle ──start──▶ Running ◀──resume/pause──▶ Paused
//!                    │                          │
//!                    ├──producer exhausted──▶ Completed
//!                    └──────────stop────────▶ Stopped ◀──stop──┘
//! ```
//!
//! Every time-dependent call takes an explicit `now` so pacing can be driven
//! deterministically.

use crate::error::SchedulerError;
use crate::producers::{Algorithm, StepProducer};
use crate::stats::{StatsCollector, StatsSnapshot};
use crate::step::{Outcome, Step};
use crate::structures::Structure;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Sleep granularity for [`Scheduler::run_blocking`]
pub const WAIT_TICK: Duration = Duration::from_millis(10);

/// Lifecycle of the scheduler's current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Completed,
    Stopped,
}

impl RunState {
    /// Running or paused
    pub fn is_active(self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Stopped)
    }
}

/// Receives every delivered Step together with the counters after it
pub trait Observer {
    fn on_step(&mut self, step: &Step, stats: &StatsSnapshot);
}

impl<F> Observer for F
where
    F: FnMut(&Step, &StatsSnapshot),
{
    fn on_step(&mut self, step: &Step, stats: &StatsSnapshot) {
        self(step, stats)
    }
}

/// What a call to [`Scheduler::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No run has been started
    Idle,
    /// Still inside the pacing delay; this much remains
    Waiting(Duration),
    Paused,
    /// One Step was delivered
    Delivered,
    /// The final Step was delivered (on this tick or earlier)
    Completed,
    Stopped,
}

struct Run {
    algorithm: Algorithm,
    producer: Box<dyn StepProducer>,
    observer: Box<dyn Observer>,
    stats: StatsCollector,
    due: Instant,
    /// Unelapsed part of the delay, captured on pause
    held: Option<Duration>,
    delivered: usize,
}

pub struct Scheduler {
    state: RunState,
    speed: Duration,
    run: Option<Run>,
    delivered: usize,
    last_stats: StatsSnapshot,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler {
            state: RunState::Idle,
            speed: Duration::ZERO,
            run: None,
            delivered: 0,
            last_stats: StatsSnapshot::default(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Steps delivered in the current (or most recent) run
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Counters of the current (or most recent) run
    pub fn stats(&self) -> StatsSnapshot {
        self.last_stats
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.run.as_ref().map(|run| run.algorithm)
    }

    /// When the next Step is due, if a run is currently pacing
    pub fn next_due(&self) -> Option<Instant> {
        match (self.state, &self.run) {
            (RunState::Running, Some(run)) => Some(run.due),
            _ => None,
        }
    }

    /// Begin a new run. The first Step is delivered on the first tick at or
    /// after `now`.
    pub fn start(
        &mut self,
        producer: Box<dyn StepProducer>,
        observer: Box<dyn Observer>,
        speed: Duration,
        now: Instant,
    ) -> Result<(), SchedulerError> {
        if self.state.is_active() {
            warn!(
                rejected = %producer.algorithm(),
                "start rejected: a run is already in progress"
            );
            return Err(SchedulerError::Busy);
        }

        let mut stats = StatsCollector::new();
        stats.reset();
        let algorithm = producer.algorithm();
        info!(%algorithm, speed_ms = speed.as_millis() as u64, "run started");

        self.speed = speed;
        self.delivered = 0;
        self.last_stats = stats.snapshot();
        self.run = Some(Run {
            algorithm,
            producer,
            observer,
            stats,
            due: now,
            held: None,
            delivered: 0,
        });
        self.state = RunState::Running;
        Ok(())
    }

    /// Hold the run; no Steps are pulled until [`Scheduler::resume`]
    pub fn pause(&mut self, now: Instant) {
        if self.state != RunState::Running {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.held = Some(run.due.saturating_duration_since(now));
            debug!(algorithm = %run.algorithm, delivered = run.delivered, "run paused");
        }
        self.state = RunState::Paused;
    }

    /// Continue a paused run; the interrupted delay picks up where it left off
    pub fn resume(&mut self, now: Instant) {
        if self.state != RunState::Paused {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.due = now + run.held.take().unwrap_or(Duration::ZERO);
            debug!(algorithm = %run.algorithm, delivered = run.delivered, "run resumed");
        }
        self.state = RunState::Running;
    }

    /// Change the delay used for every wait that starts after this call
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
    }

    /// Abandon the run. Returns the structure as the producer left it.
    ///
    /// The observer is dropped with the run, so it is never called again.
    pub fn stop(&mut self) -> Option<Structure> {
        if !self.state.is_active() {
            return None;
        }
        self.state = RunState::Stopped;
        let run = self.run.take()?;
        info!(algorithm = %run.algorithm, delivered = run.delivered, "run stopped");
        Some(run.producer.structure())
    }

    /// Forget a finished or stopped run and return to `Idle`
    pub fn discard(&mut self) {
        if self.state.is_terminal() {
            self.state = RunState::Idle;
            self.run = None;
        }
    }

    /// Deliver the next Step if the run is running and its delay has elapsed
    pub fn tick(&mut self, now: Instant) -> Tick {
        match self.state {
            RunState::Idle => return Tick::Idle,
            RunState::Paused => return Tick::Paused,
            RunState::Completed => return Tick::Completed,
            RunState::Stopped => return Tick::Stopped,
            RunState::Running => {}
        }
        let Some(run) = self.run.as_mut() else {
            self.state = RunState::Idle;
            return Tick::Idle;
        };

        if now < run.due {
            return Tick::Waiting(run.due - now);
        }

        let step = match run.producer.next_step(&mut run.stats) {
            Some(step) => step,
            None => Step::Complete {
                state: run.producer.structure(),
                outcome: Outcome::Finished,
            },
        };
        run.stats.record(&step);
        let stats = run.stats.snapshot();
        run.observer.on_step(&step, &stats);
        run.delivered += 1;
        debug!(
            algorithm = %run.algorithm,
            index = run.delivered,
            kind = step.kind(),
            "step delivered"
        );

        self.delivered = run.delivered;
        self.last_stats = stats;

        if step.is_complete() {
            info!(algorithm = %run.algorithm, steps = run.delivered, "run completed");
            self.run = None;
            self.state = RunState::Completed;
            return Tick::Completed;
        }

        run.due = now + self.speed;
        Tick::Delivered
    }

    /// Drive the current run to a terminal state on this thread, sleeping
    /// through pacing delays. Returns immediately unless running.
    pub fn run_blocking(&mut self) -> RunState {
        while self.state == RunState::Running {
            if let Tick::Waiting(remaining) = self.tick(Instant::now()) {
                thread::sleep(remaining.min(WAIT_TICK));
            }
        }
        self.state
    }
}
