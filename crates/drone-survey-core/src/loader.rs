use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};

use crate::constants;
use crate::grid::{Coord, Grid, GridError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    UnsupportedGridSize { size: usize },
    MissingRow { row: usize },
    RowTooShort { row: usize, expected: usize, actual: usize },
    InvalidValue { row: usize, column: usize },
    NegativeValue { row: usize, column: usize },
    Grid(GridError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnsupportedGridSize { size } => {
                write!(f, "invalid grid size ({size}); must be 20, 100, or 1000")
            }
            LoadError::MissingRow { row } => write!(f, "grid data is missing row {row}"),
            LoadError::RowTooShort {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row} holds {actual} values, expected {expected}"
            ),
            LoadError::InvalidValue { row, column } => {
                write!(f, "value at row {row}, column {column} is not a valid plane value")
            }
            LoadError::NegativeValue { row, column } => {
                write!(f, "value at row {row}, column {column} is negative")
            }
            LoadError::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LoadError {
    fn from(err: GridError) -> Self {
        LoadError::Grid(err)
    }
}

fn check_supported_size(size: usize) -> Result<(), LoadError> {
    if !constants::SUPPORTED_GRID_SIZES.contains(&size) {
        return Err(LoadError::UnsupportedGridSize { size });
    }
    Ok(())
}

/// Parse a fully initialized grid from `size` rows of whitespace-separated
/// non-negative integers. Every cell must be supplied.
pub fn parse_grid(size: usize, text: &str) -> Result<Grid, LoadError> {
    check_supported_size(size)?;
    let mut grid = Grid::try_new(size)?;
    let mut lines = text.lines();
    for y in 0..size {
        let line = lines.next().ok_or(LoadError::MissingRow { row: y })?;
        let mut values = 0usize;
        for (x, token) in line.split_whitespace().take(size).enumerate() {
            let value: i64 = token
                .parse()
                .map_err(|_| LoadError::InvalidValue { row: y, column: x })?;
            if value < 0 {
                return Err(LoadError::NegativeValue { row: y, column: x });
            }
            let value =
                u32::try_from(value).map_err(|_| LoadError::InvalidValue { row: y, column: x })?;
            grid.initialize_plane(Coord::new(x, y), value)?;
            values += 1;
        }
        if values < size {
            return Err(LoadError::RowTooShort {
                row: y,
                expected: size,
                actual: values,
            });
        }
    }
    Ok(grid)
}

/// Produce a fully initialized grid with deterministic seeded values in
/// `0..=MAX_GENERATED_VALUE`. The same seed always yields the same grid.
pub fn generate_grid(size: usize, seed: u64) -> Result<Grid, LoadError> {
    check_supported_size(size)?;
    let mut grid = Grid::try_new(size)?;
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    for y in 0..size {
        for x in 0..size {
            let value = rng.random_range(0..=constants::MAX_GENERATED_VALUE);
            grid.initialize_plane(Coord::new(x, y), value)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_text(size: usize, fill: impl Fn(usize, usize) -> i64) -> String {
        let mut text = String::new();
        for y in 0..size {
            let row: Vec<String> = (0..size).map(|x| fill(x, y).to_string()).collect();
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text
    }

    #[test]
    fn parse_rejects_unsupported_size() {
        assert_eq!(
            parse_grid(3, "0 0 0\n0 0 0\n0 0 0\n").unwrap_err(),
            LoadError::UnsupportedGridSize { size: 3 }
        );
    }

    #[test]
    fn parse_fills_every_plane() {
        let text = grid_text(20, |x, y| ((x + y) % 10) as i64);
        let grid = parse_grid(20, &text).unwrap();
        assert!(grid.is_fully_initialized());
        let plane = grid.plane(Coord::new(3, 4)).unwrap().unwrap();
        assert_eq!(plane.base_value(), 7);
        assert_eq!(plane.last_visited(), None);
    }

    #[test]
    fn parse_rejects_missing_row() {
        let mut text = grid_text(20, |_, _| 1);
        text = text.lines().take(19).collect::<Vec<_>>().join("\n");
        assert_eq!(
            parse_grid(20, &text).unwrap_err(),
            LoadError::MissingRow { row: 19 }
        );
    }

    #[test]
    fn parse_rejects_short_row() {
        let mut rows: Vec<String> = grid_text(20, |_, _| 1).lines().map(String::from).collect();
        rows[4] = "1 2 3".to_string();
        let text = rows.join("\n");
        assert_eq!(
            parse_grid(20, &text).unwrap_err(),
            LoadError::RowTooShort {
                row: 4,
                expected: 20,
                actual: 3
            }
        );
    }

    #[test]
    fn parse_rejects_negative_and_malformed_values() {
        let mut rows: Vec<String> = grid_text(20, |_, _| 1).lines().map(String::from).collect();
        rows[0] = {
            let mut row: Vec<String> = (0..20).map(|_| "1".to_string()).collect();
            row[5] = "-2".to_string();
            row.join(" ")
        };
        let text = rows.join("\n");
        assert_eq!(
            parse_grid(20, &text).unwrap_err(),
            LoadError::NegativeValue { row: 0, column: 5 }
        );

        let mut rows: Vec<String> = grid_text(20, |_, _| 1).lines().map(String::from).collect();
        rows[2] = {
            let mut row: Vec<String> = (0..20).map(|_| "1".to_string()).collect();
            row[0] = "abc".to_string();
            row.join(" ")
        };
        let text = rows.join("\n");
        assert_eq!(
            parse_grid(20, &text).unwrap_err(),
            LoadError::InvalidValue { row: 2, column: 0 }
        );
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let a = generate_grid(20, 7).unwrap();
        let b = generate_grid(20, 7).unwrap();
        assert!(a.is_fully_initialized());
        for y in 0..20 {
            for x in 0..20 {
                let at = Coord::new(x, y);
                let va = a.plane(at).unwrap().unwrap().base_value();
                let vb = b.plane(at).unwrap().unwrap().base_value();
                assert_eq!(va, vb);
                assert!(va <= constants::MAX_GENERATED_VALUE);
            }
        }
    }

    #[test]
    fn generate_rejects_unsupported_size() {
        assert_eq!(
            generate_grid(64, 1).unwrap_err(),
            LoadError::UnsupportedGridSize { size: 64 }
        );
    }
}
