use crate::grid::{Coord, Grid};
use crate::score::RegenerationScorer;

/// Read-only view of the run at one step, handed to observers.
///
/// The scorer is included so renderers can display the current collectible
/// value of any plane without owning a scorer of their own.
pub struct StepSnapshot<'a> {
    pub grid: &'a Grid,
    pub scorer: &'a RegenerationScorer,
    pub step: usize,
    pub elapsed_ms: u64,
    pub position: Coord,
    pub plane_score: u64,
    pub total_score: u64,
}

/// Synchronous observer of a survey run. Invoked inline with the loop and
/// must not affect simulation state; all methods default to no-ops.
pub trait RunObserver {
    fn run_started(&mut self, _start: Coord, _max_steps: usize, _time_budget_ms: u64) {}

    fn step_observed(&mut self, _snapshot: &StepSnapshot<'_>) {}

    fn move_chosen(&mut self, _next: Coord) {}

    fn time_budget_exceeded(&mut self, _time_budget_ms: u64, _step: usize) {}

    fn run_completed(&mut self, _elapsed_ms: u64) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
