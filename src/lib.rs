//! SpeedGo: a small Go rule engine.
//!
//! Stones are placed alternately on a fixed grid, chains without liberties
//! are captured, and suicide is forbidden unless the move captures. There is
//! no ko rule and no scoring. The computer opponent picks a uniformly random
//! legal move.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions
//! - [`board`] - Grid snapshot, neighbors and chain flood-fill
//! - [`position`] - The rule engine (legality, captures, turn)
//! - [`playout`] - Random computer player and self-play
//! - [`game`] - Human versus computer match session
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use speedgo::board::Color;
//! use speedgo::playout::pick_free_intersection;
//! use speedgo::position::{Position, parse_coord};
//!
//! let mut pos = Position::new();
//! let d4 = parse_coord("D4").unwrap();
//! assert!(pos.is_legal(d4));
//! pos.put_stone(d4);
//! assert_eq!(pos.who(), Color::White);
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let reply = pick_free_intersection(&pos, &mut rng).unwrap();
//! pos.put_stone(reply);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod gtp;
pub mod playout;
pub mod position;
