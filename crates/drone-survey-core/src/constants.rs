/// Default time for a depleted plane to ramp back to its full base value, in
/// milliseconds.
pub const REGENERATION_PERIOD_MS: u64 = 100;

/// Default score addend granted to candidate moves onto planes not yet part
/// of the current path.
pub const EXPLORATION_BONUS: u64 = 10;

/// Grid side lengths the survey entry points accept by default.
pub const SUPPORTED_GRID_SIZES: [usize; 3] = [20, 100, 1000];

/// Offsets `(dx, dy)` of the eight surrounding planes, applied as
/// `(x + dx, y + dy)`. The enumeration order is observable: ties between
/// equally scored candidates resolve to the earliest direction.
pub const NEIGHBOR_DIRECTIONS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Largest plane value emitted by the seeded grid generator.
pub const MAX_GENERATED_VALUE: u32 = 9;
