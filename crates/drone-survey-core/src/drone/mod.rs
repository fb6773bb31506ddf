
use std::collections::HashSet;
use std::{error::Error, fmt};

use crate::clock::Clock;
use crate::config::{SimConfig, SimConfigError};
use crate::grid::{Coord, Grid, GridError, PlaneError};
use crate::navigator::{NeighborSelector, SelectError, VisitedMask};
use crate::observer::{RunObserver, StepSnapshot};
use crate::report::{RunOutcome, RunReport};
use crate::score::{RegenerationScorer, ScoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DroneError {
    Config(SimConfigError),
    GridSizeMismatch { expected: usize, actual: usize },
    Grid(GridError),
    UninitializedPlane { at: Coord },
    Score(ScoreError),
    Select(SelectError),
    Plane(PlaneError),
}

impl fmt::Display for DroneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DroneError::Config(e) => write!(f, "{e}"),
            DroneError::GridSizeMismatch { expected, actual } => write!(
                f,
                "grid side length ({actual}) must match the configured grid_size ({expected})"
            ),
            DroneError::Grid(e) => write!(f, "{e}"),
            DroneError::UninitializedPlane { at } => {
                write!(f, "plane at {at} was never initialized")
            }
            DroneError::Score(e) => write!(f, "{e}"),
            DroneError::Select(e) => write!(f, "{e}"),
            DroneError::Plane(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DroneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DroneError::Config(e) => Some(e),
            DroneError::Grid(e) => Some(e),
            DroneError::Score(e) => Some(e),
            DroneError::Select(e) => Some(e),
            DroneError::Plane(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SimConfigError> for DroneError {
    fn from(err: SimConfigError) -> Self {
        DroneError::Config(err)
    }
}

impl From<GridError> for DroneError {
    fn from(err: GridError) -> Self {
        DroneError::Grid(err)
    }
}

impl From<ScoreError> for DroneError {
    fn from(err: ScoreError) -> Self {
        DroneError::Score(err)
    }
}

impl From<SelectError> for DroneError {
    fn from(err: SelectError) -> Self {
        DroneError::Select(err)
    }
}

impl From<PlaneError> for DroneError {
    fn from(err: PlaneError) -> Self {
        DroneError::Plane(err)
    }
}

/// Drives a greedy survey run: advances the logical clock, collects the
/// occupied plane's value, asks the selector for the next move, and stamps
/// visitation watermarks, until the step budget or the time budget trips.
pub struct Drone {
    config: SimConfig,
    scorer: RegenerationScorer,
    selector: NeighborSelector,
}

impl Drone {
    pub fn new(config: SimConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(config: SimConfig) -> Result<Self, DroneError> {
        config.validate()?;
        let scorer = RegenerationScorer::try_new(config.regeneration_period_ms)?;
        let selector = NeighborSelector::new(config.exploration_bonus);
        Ok(Self {
            config,
            scorer,
            selector,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run the survey over `grid`, which the drone owns exclusively for the
    /// duration. Watermarks left on the grid are a deliberate side effect;
    /// rerunning over the same grid continues from them, so a fresh
    /// comparison wants a freshly loaded grid.
    ///
    /// Hitting a budget is a normal outcome: the report carries whatever
    /// path and score had accrued by then.
    pub fn survey<C: Clock, O: RunObserver>(
        &self,
        grid: &mut Grid,
        clock: &C,
        observer: &mut O,
    ) -> Result<RunReport, DroneError> {
        if grid.size() != self.config.grid_size {
            return Err(DroneError::GridSizeMismatch {
                expected: self.config.grid_size,
                actual: grid.size(),
            });
        }

        let start = Coord::new(self.config.start_x, self.config.start_y);
        let max_steps = self.config.max_steps;
        let budget_ms = self.config.time_budget_ms;

        let mut path = vec![start];
        let mut position = start;
        let mut total_score: u64 = 0;
        let mut steps_completed = 0;
        let mut outcome = RunOutcome::StepsExhausted;

        observer.run_started(start, max_steps, budget_ms);

        for step in 0..max_steps {
            if clock.elapsed_ms() >= budget_ms {
                observer.time_budget_exceeded(budget_ms, step);
                outcome = RunOutcome::TimeExpired;
                break;
            }

            // One timestamp per step: scoring and the visitation stamp below
            // must agree on when this step happened.
            let current_time = clock.elapsed_ms();

            let plane = grid
                .plane(position)?
                .ok_or(DroneError::UninitializedPlane { at: position })?;
            let plane_score = self.scorer.score(plane, current_time)?;
            total_score += plane_score;

            observer.step_observed(&StepSnapshot {
                grid,
                scorer: &self.scorer,
                step,
                elapsed_ms: current_time,
                position,
                plane_score,
                total_score,
            });

            // Observer work takes real time; the budget may have tripped
            // while reporting, before any mutation happened.
            if clock.elapsed_ms() >= budget_ms {
                observer.time_budget_exceeded(budget_ms, step);
                outcome = RunOutcome::TimeExpired;
                break;
            }

            let locally_visited = VisitedMask::from_path(grid.size(), &path);
            let next = self.selector.pick_best(
                grid,
                position,
                current_time,
                &locally_visited,
                &self.scorer,
            )?;
            observer.move_chosen(next);

            // The plane being vacated is the one marked visited, not the
            // destination, and this happens even on the final step.
            grid.plane_mut(position)?
                .ok_or(DroneError::UninitializedPlane { at: position })?
                .visit(current_time)?;

            steps_completed = step + 1;

            if step + 1 < max_steps {
                path.push(next);
                position = next;
            }
        }

        let elapsed_ms = clock.elapsed_ms();
        observer.run_completed(elapsed_ms);

        let unique_planes_visited = path.iter().collect::<HashSet<_>>().len();
        Ok(RunReport {
            schema_version: 1,
            path,
            score: total_score,
            steps_completed,
            elapsed_ms,
            outcome,
            unique_planes_visited,
        })
    }
}
