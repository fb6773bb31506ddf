use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::constants::NEIGHBOR_DIRECTIONS;

/// A grid coordinate. `x` grows rightward, `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidSize,
    OutOfBounds { at: Coord, size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSize => write!(f, "grid size must be a positive integer"),
            GridError::OutOfBounds { at, size } => {
                write!(f, "coordinates {at} are outside the {size}x{size} grid")
            }
        }
    }
}

impl Error for GridError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaneError {
    VisitBeforeWatermark { time_ms: u64, last_visited_ms: u64 },
}

impl fmt::Display for PlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaneError::VisitBeforeWatermark {
                time_ms,
                last_visited_ms,
            } => write!(
                f,
                "visit time ({time_ms}ms) cannot be earlier than the last visited time ({last_visited_ms}ms)"
            ),
        }
    }
}

impl Error for PlaneError {}

/// One grid location: an immutable base value plus the time it was last
/// visited. `None` means never visited, so the plane is fully charged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    base_value: u32,
    last_visited: Option<u64>,
}

impl Plane {
    pub fn new(base_value: u32) -> Self {
        Self {
            base_value,
            last_visited: None,
        }
    }

    pub fn base_value(&self) -> u32 {
        self.base_value
    }

    pub fn last_visited(&self) -> Option<u64> {
        self.last_visited
    }

    /// Record a visit at `time_ms`. The watermark is monotone: recording a
    /// time earlier than an already-recorded visit is a logic error in the
    /// driving loop and is rejected.
    pub fn visit(&mut self, time_ms: u64) -> Result<(), PlaneError> {
        if let Some(last) = self.last_visited {
            if time_ms < last {
                return Err(PlaneError::VisitBeforeWatermark {
                    time_ms,
                    last_visited_ms: last,
                });
            }
        }
        self.last_visited = Some(time_ms);
        Ok(())
    }
}

/// A square N x N field of planes backed by a flat vector.
///
/// Slots start empty; `initialize_plane` fills them. An empty slot is
/// observable through `plane` returning `Ok(None)`, distinct from a plane
/// whose value happens to be zero.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    planes: Vec<Option<Plane>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self::try_new(size).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::InvalidSize);
        }
        Ok(Self {
            size,
            planes: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.x < self.size && at.y < self.size
    }

    /// Place a plane with the given base value at `at`, replacing any plane
    /// already there.
    pub fn initialize_plane(&mut self, at: Coord, base_value: u32) -> Result<(), GridError> {
        let idx = self.checked_index(at)?;
        self.planes[idx] = Some(Plane::new(base_value));
        Ok(())
    }

    pub fn plane(&self, at: Coord) -> Result<Option<&Plane>, GridError> {
        let idx = self.checked_index(at)?;
        Ok(self.planes[idx].as_ref())
    }

    pub fn plane_mut(&mut self, at: Coord) -> Result<Option<&mut Plane>, GridError> {
        let idx = self.checked_index(at)?;
        Ok(self.planes[idx].as_mut())
    }

    /// Coordinates of the up-to-8 surrounding planes, clamped to the grid,
    /// in the fixed stencil order of [`NEIGHBOR_DIRECTIONS`].
    pub fn neighbor_coordinates(&self, at: Coord) -> Result<Vec<Coord>, GridError> {
        self.checked_index(at)?;
        let mut neighbors = Vec::with_capacity(NEIGHBOR_DIRECTIONS.len());
        for (dx, dy) in NEIGHBOR_DIRECTIONS {
            let nx = at.x as i64 + dx;
            let ny = at.y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < self.size && (ny as usize) < self.size {
                neighbors.push(Coord::new(nx as usize, ny as usize));
            }
        }
        Ok(neighbors)
    }

    /// True once every slot holds a plane.
    pub fn is_fully_initialized(&self) -> bool {
        self.planes.iter().all(|p| p.is_some())
    }

    fn checked_index(&self, at: Coord) -> Result<usize, GridError> {
        if !self.contains(at) {
            return Err(GridError::OutOfBounds {
                at,
                size: self.size,
            });
        }
        Ok(at.y * self.size + at.x)
    }
}
