use std::{error::Error, fmt};

use crate::constants;
use crate::grid::{Coord, Grid, GridError};
use crate::score::{RegenerationScorer, ScoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    Grid(GridError),
    Score(ScoreError),
    UninitializedPlane { at: Coord },
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectError::Grid(e) => write!(f, "{e}"),
            SelectError::Score(e) => write!(f, "{e}"),
            SelectError::UninitializedPlane { at } => {
                write!(f, "plane at {at} was never initialized")
            }
        }
    }
}

impl Error for SelectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SelectError::Grid(e) => Some(e),
            SelectError::Score(e) => Some(e),
            SelectError::UninitializedPlane { .. } => None,
        }
    }
}

impl From<GridError> for SelectError {
    fn from(err: GridError) -> Self {
        SelectError::Grid(err)
    }
}

impl From<ScoreError> for SelectError {
    fn from(err: ScoreError) -> Self {
        SelectError::Score(err)
    }
}

/// Which planes the current path has already touched, rebuilt from the path
/// each step. Distinct from the per-plane visitation watermark, which
/// persists for the grid's whole lifetime.
#[derive(Clone, Debug)]
pub struct VisitedMask {
    size: usize,
    cells: Vec<bool>,
}

impl VisitedMask {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn from_path(size: usize, path: &[Coord]) -> Self {
        let mut mask = Self::new(size);
        for &at in path {
            mask.mark(at);
        }
        mask
    }

    pub fn mark(&mut self, at: Coord) {
        self.cells[at.y * self.size + at.x] = true;
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells[at.y * self.size + at.x]
    }
}

/// Greedy one-step move selection.
#[derive(Clone, Debug)]
pub struct NeighborSelector {
    exploration_bonus: u64,
}

impl Default for NeighborSelector {
    fn default() -> Self {
        Self {
            exploration_bonus: constants::EXPLORATION_BONUS,
        }
    }
}

impl NeighborSelector {
    pub fn new(exploration_bonus: u64) -> Self {
        Self { exploration_bonus }
    }

    /// Pick the neighbor of `position` with the highest anticipated value.
    ///
    /// Candidates are scored one time unit ahead of `current_time_ms`, and
    /// planes not yet on the current path receive the exploration bonus.
    /// Ties resolve to the earliest direction in the stencil order. With no
    /// neighbors at all (a 1x1 grid) the current position is returned.
    pub fn pick_best(
        &self,
        grid: &Grid,
        position: Coord,
        current_time_ms: u64,
        locally_visited: &VisitedMask,
        scorer: &RegenerationScorer,
    ) -> Result<Coord, SelectError> {
        let mut best: Option<(Coord, u64)> = None;
        for neighbor in grid.neighbor_coordinates(position)? {
            let plane = grid
                .plane(neighbor)?
                .ok_or(SelectError::UninitializedPlane { at: neighbor })?;
            let mut candidate_score = scorer.score(plane, current_time_ms + 1)?;
            if !locally_visited.contains(neighbor) {
                candidate_score += self.exploration_bonus;
            }
            match best {
                Some((_, best_score)) if candidate_score <= best_score => {}
                _ => best = Some((neighbor, candidate_score)),
            }
        }
        Ok(best.map_or(position, |(coord, _)| coord))
    }
}
