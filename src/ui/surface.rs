//! One visualization surface: a structure, its algorithms, and its own run

use crate::controller::{Launch, RunController};
use crate::error::RunError;
use crate::producers::{Algorithm, Params, TraversalOrder};
use crate::scheduler::RunState;
use crate::stats::StatsSnapshot;
use crate::step::Step;
use crate::structures::{Domain, Structure};
use crate::view::RunView;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub struct Surface {
    pub domain: Domain,
    pub algorithms: &'static [Algorithm],
    pub selected: usize,
    pub order: TraversalOrder,
    /// Structure as it stands between runs
    pub structure: Structure,
    pub view: Rc<RefCell<RunView>>,
    pub controller: RunController,
    /// A launched run whose final structure has not been adopted yet
    unsettled: bool,
}

impl Surface {
    pub fn new(
        domain: Domain,
        algorithms: &'static [Algorithm],
        structure: Structure,
        speed: Duration,
    ) -> Self {
        Surface {
            domain,
            algorithms,
            selected: 0,
            order: TraversalOrder::In,
            view: Rc::new(RefCell::new(RunView::new(structure.clone()))),
            structure,
            controller: RunController::new(speed),
            unsettled: false,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithms[self.selected % self.algorithms.len()]
    }

    pub fn cycle_algorithm(&mut self, forward: bool) {
        let len = self.algorithms.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    pub fn cycle_order(&mut self) {
        self.order = match self.order {
            TraversalOrder::Pre => TraversalOrder::In,
            TraversalOrder::In => TraversalOrder::Post,
            TraversalOrder::Post => TraversalOrder::Pre,
        };
    }

    pub fn is_busy(&self) -> bool {
        self.controller.state().is_active()
    }

    /// Start `algorithm` on a copy of the current structure
    pub fn launch(
        &mut self,
        algorithm: Algorithm,
        params: Params,
        now: Instant,
    ) -> Result<Launch, RunError> {
        if self.is_busy() {
            return Err(RunError::Busy);
        }
        self.view.borrow_mut().clear_run();
        self.view.borrow_mut().structure = Some(self.structure.clone());

        let view = Rc::clone(&self.view);
        let observer = move |step: &Step, stats: &StatsSnapshot| view.borrow_mut().apply(step, stats);
        let launch = self
            .controller
            .run(algorithm, self.structure.clone(), params, observer, now)?;
        self.unsettled = true;
        Ok(launch)
    }

    /// Once a run completes, its final structure becomes the surface's structure.
    ///
    /// Returns true only on the first call after completion. The controller
    /// stays `Completed` until the next launch or edit.
    pub fn settle(&mut self) -> bool {
        if !self.unsettled || self.controller.state() != RunState::Completed {
            return false;
        }
        self.unsettled = false;
        if let Some(structure) = self.view.borrow().structure.clone() {
            self.structure = structure;
        }
        true
    }

    /// Stop an active run, keeping whatever partial state it reached.
    /// A run that already ended is discarded instead.
    pub fn reset(&mut self) {
        self.unsettled = false;
        match self.controller.stop() {
            Some(partial) => self.structure = partial,
            None => {
                self.controller.reset();
            }
        }
        let mut view = self.view.borrow_mut();
        view.clear_run();
        view.structure = Some(self.structure.clone());
    }

    /// Replace the structure outright (new array, sample graph, ...)
    pub fn replace(&mut self, structure: Structure) {
        self.unsettled = false;
        self.controller.reset();
        self.structure = structure;
        let mut view = self.view.borrow_mut();
        view.clear_run();
        view.structure = Some(self.structure.clone());
    }
}
