//! Computer player: uniform random legal moves.
//!
//! The computer does not evaluate moves. It enumerates every legal point for
//! the side to move and picks one uniformly at random. [`random_game`] chains
//! such moves for self-play.

use tracing::{debug, trace};

use crate::board::{Color, Point};
use crate::position::{Position, str_coord};

/// Pick a uniformly random legal point for the side to move.
///
/// Legal points are collected in row-major scan order and the `r`-th one is
/// returned for `r` drawn uniformly from `[0, count)`. Returns `None` when the
/// side to move has no legal point.
pub fn pick_free_intersection(pos: &Position, rng: &mut fastrand::Rng) -> Option<Point> {
    let legal = pos.legal_moves();
    trace!(player = %pos.who(), legal = legal.len(), "enumerated legal moves");
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.usize(..legal.len())])
}

/// Summary of a self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayoutSummary {
    /// Stones placed.
    pub moves: usize,
    /// Stones captured by Black.
    pub black_captures: usize,
    /// Stones captured by White.
    pub white_captures: usize,
    /// The side that ran out of legal moves, if the game ended that way
    /// rather than by reaching the move cap.
    pub stuck: Option<Color>,
}

/// Play random legal moves for both sides until the side to move has no
/// legal point or `max_moves` stones have been placed.
///
/// When a side gets stuck the turn is switched once more, mirroring how a
/// finished match hands the turn back.
pub fn random_game(pos: &mut Position, rng: &mut fastrand::Rng, max_moves: usize) -> PlayoutSummary {
    let mut summary = PlayoutSummary::default();

    while summary.moves < max_moves {
        let Some(pt) = pick_free_intersection(pos, rng) else {
            summary.stuck = Some(pos.who());
            pos.switch_player();
            break;
        };
        let player = pos.who();
        let captured = pos.put_stone(pt);
        match player {
            Color::Black => summary.black_captures += captured,
            Color::White => summary.white_captures += captured,
        }
        summary.moves += 1;
        trace!(player = %player, at = %str_coord(pt), captured, "random move");
    }

    debug!(
        moves = summary.moves,
        black_captures = summary.black_captures,
        white_captures = summary.white_captures,
        stuck = ?summary.stuck,
        "random game finished"
    );
    summary
}
