use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    /// Side length of the square grid to survey.
    pub grid_size: usize,
    /// Starting x coordinate of the drone.
    pub start_x: usize,
    /// Starting y coordinate of the drone.
    pub start_y: usize,
    /// Maximum number of steps the drone may take.
    pub max_steps: usize,
    /// Wall-clock budget for the whole run, in milliseconds.
    pub time_budget_ms: u64,
    /// Time for a depleted plane to regenerate to full value, in milliseconds.
    pub regeneration_period_ms: u64,
    /// Score addend for candidate planes not yet on the current path.
    pub exploration_bonus: u64,
    /// Deterministic seed for generated grids.
    pub seed: u64,
    /// Grid side lengths accepted by the survey entry points.
    pub supported_grid_sizes: Vec<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            start_x: 0,
            start_y: 0,
            max_steps: 20,
            time_budget_ms: 3000,
            regeneration_period_ms: constants::REGENERATION_PERIOD_MS,
            exploration_bonus: constants::EXPLORATION_BONUS,
            seed: 42,
            supported_grid_sizes: constants::SUPPORTED_GRID_SIZES.to_vec(),
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    EmptySupportedSizes => "supported_grid_sizes must not be empty";
    UnsupportedGridSize { size: usize } => "grid size ({size}) is not in the supported set";
    InvalidMaxSteps => "max_steps must be greater than 0";
    InvalidTimeBudget => "time_budget_ms must be greater than 0";
    InvalidRegenerationPeriod => "regeneration_period_ms must be greater than 0";
    StartOutOfBounds { x: usize, y: usize, size: usize } => "start position ({x}, {y}) is outside the {size}x{size} grid";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.supported_grid_sizes.is_empty() {
            return Err(SimConfigError::EmptySupportedSizes);
        }
        if !self.supported_grid_sizes.contains(&self.grid_size) {
            return Err(SimConfigError::UnsupportedGridSize {
                size: self.grid_size,
            });
        }
        if self.max_steps == 0 {
            return Err(SimConfigError::InvalidMaxSteps);
        }
        if self.time_budget_ms == 0 {
            return Err(SimConfigError::InvalidTimeBudget);
        }
        if self.regeneration_period_ms == 0 {
            return Err(SimConfigError::InvalidRegenerationPeriod);
        }
        if self.start_x >= self.grid_size || self.start_y >= self.grid_size {
            return Err(SimConfigError::StartOutOfBounds {
                x: self.start_x,
                y: self.start_y,
                size: self.grid_size,
            });
        }
        Ok(())
    }
}
