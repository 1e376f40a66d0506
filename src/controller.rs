//! Run controller
//!
//! A thin façade over one [`Scheduler`] for UI callers: pick the producer for
//! an algorithm, start it, toggle pause, reset. Each visualization surface
//! owns its own controller, and controllers share nothing.

use crate::error::RunError;
use crate::producers::{self, Algorithm, Params};
use crate::scheduler::{Observer, RunState, Scheduler, Tick};
use crate::stats::StatsSnapshot;
use crate::structures::Structure;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a successful [`RunController::run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Started,
    /// The structure was empty. The run still delivers a single `Complete`.
    NothingToDo,
}

pub struct RunController {
    scheduler: Scheduler,
    speed: Duration,
}

impl RunController {
    pub fn new(speed: Duration) -> Self {
        RunController {
            scheduler: Scheduler::new(),
            speed,
        }
    }

    /// Start `algorithm` on `structure`, which now belongs to the run
    pub fn run<O>(
        &mut self,
        algorithm: Algorithm,
        structure: Structure,
        params: Params,
        observer: O,
        now: Instant,
    ) -> Result<Launch, RunError>
    where
        O: Observer + 'static,
    {
        if self.scheduler.state().is_active() {
            return Err(RunError::Busy);
        }

        let producer = producers::build(algorithm, structure, params)?;
        let launch = if producer.nothing_to_do() {
            info!(%algorithm, "nothing to do on an empty structure");
            Launch::NothingToDo
        } else {
            Launch::Started
        };

        self.scheduler.discard();
        self.scheduler
            .start(producer, Box::new(observer), self.speed, now)?;
        Ok(launch)
    }

    /// Pause a running run or resume a paused one; anything else is ignored
    pub fn toggle(&mut self, now: Instant) -> RunState {
        match self.scheduler.state() {
            RunState::Running => self.scheduler.pause(now),
            RunState::Paused => self.scheduler.resume(now),
            _ => {}
        }
        self.scheduler.state()
    }

    /// Stop any active run and return to idle.
    ///
    /// Returns the structure in whatever state the run left it; partial
    /// mutations are not rolled back.
    pub fn reset(&mut self) -> Option<Structure> {
        let partial = self.scheduler.stop();
        self.scheduler.discard();
        partial
    }

    /// Stop an active run but stay `Stopped` until the next run or reset
    pub fn stop(&mut self) -> Option<Structure> {
        self.scheduler.stop()
    }

    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
        self.scheduler.set_speed(speed);
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        self.scheduler.tick(now)
    }

    pub fn state(&self) -> RunState {
        self.scheduler.state()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.scheduler.stats()
    }

    pub fn delivered(&self) -> usize {
        self.scheduler.delivered()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Drive the active run to completion on this thread
    pub fn finish_blocking(&mut self) -> RunState {
        self.scheduler.run_blocking()
    }
}
