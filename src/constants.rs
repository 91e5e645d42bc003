//! Board geometry.
//!
//! The board size is fixed at compile time and controlled by Cargo features:
//! - `board19x19` (default): 19x19 board
//! - `board13x13`: 13x13 board
//! - `board9x9`: 9x9 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                            # 19x19 (default)
//! cargo build --no-default-features --features board9x9  # 9x9
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the square board.
#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

#[cfg(feature = "board19x19")]
pub const N: usize = 19;

#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable exactly one board size feature: 'board9x9', 'board13x13' or 'board19x19'");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!("Must enable one board size feature: 'board9x9', 'board13x13' or 'board19x19'");

/// Number of columns.
pub const BOARD_W: usize = N;

/// Number of rows.
pub const BOARD_H: usize = N;

/// Number of intersections on the board.
pub const BOARDSIZE: usize = BOARD_W * BOARD_H;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Orthogonal neighbor offsets as `(dx, dy)`.
/// Order: Up, Right, Down, Left (row 0 is the top edge).
pub const DELTA: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Default cap on self-play length (three times the board area leaves room
/// for captures and refills).
pub const MAX_GAME_LEN: usize = BOARDSIZE * 3;
