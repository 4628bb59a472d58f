//! Board geometry and ingest thresholds.

/// Board size used when a record carries no `SZ` property.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board the two-letter SGF coordinate scheme can address here.
pub const MAX_BOARD_SIZE: usize = 25;

/// Boards up to this size treat the coordinate `tt` as a pass.
pub const TT_PASS_MAX_SIZE: usize = 19;

/// Games with fewer moves than this are left out of a catalog scan.
pub const DEFAULT_MIN_MOVES: usize = 20;

/// Orthogonal neighbor offsets as (row, col) deltas.
/// Order: North, East, South, West
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Diagonal directions used to enumerate the 2x2 blocks around a point.
pub const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
