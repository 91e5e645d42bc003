//! A SpeedGo match: the human plays Black, the computer plays White.
//!
//! The human wins by leaving the computer without a legal move while White
//! has no stone on the board. The match is lost as soon as the computer
//! captures, as soon as the human leaves White a capturing reply, or when
//! the computer is stuck while still holding stones.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::{Board, Color, Intersection, Point};
use crate::playout::pick_free_intersection;
use crate::position::{MoveError, Position, str_coord};

const HUMAN: Color = Color::Black;
const COMPUTER: Color = Color::White;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    /// The human gave up.
    Abandoned,
}

/// What the computer did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerTurn {
    Played { at: Point, captured: usize },
    /// No legal point was left; the match is over.
    NoMove,
}

pub struct Game {
    pos: Position,
    rng: fastrand::Rng,
    steps: usize,
    prisoners: usize,
    outcome: Option<Outcome>,
    started: Instant,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a match with an entropy-seeded computer player.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            pos: Position::new(),
            rng,
            steps: 0,
            prisoners: 0,
            outcome: None,
            started: Instant::now(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Moves the human has made.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Stones the human has captured.
    pub fn prisoners(&self) -> usize {
        self.prisoners
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the computer is on move.
    ///
    /// A human move that leaves White a capture ends the match, but the
    /// computer still plays its reply onto the final board. Resigning skips
    /// that reply.
    pub fn computer_to_move(&self) -> bool {
        self.pos.who() == COMPUTER && self.outcome != Some(Outcome::Abandoned)
    }

    /// Play the human's stone at `pt`. Returns the number of stones captured.
    pub fn human_move(&mut self, pt: Point) -> Result<usize, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.pos.who() != HUMAN {
            return Err(MoveError::OutOfTurn);
        }
        let captured = self.pos.try_put_stone(pt)?;
        self.prisoners += captured;
        self.steps += 1;
        debug!(at = %str_coord(pt), captured, steps = self.steps, "human move");

        if self.computer_can_capture() {
            self.finish(Outcome::Lost);
        }
        Ok(captured)
    }

    /// Let the computer move. An outcome already decided is kept.
    ///
    /// # Panics
    /// If it is not the computer's turn.
    pub fn computer_move(&mut self) -> ComputerTurn {
        assert!(self.computer_to_move(), "computer_move out of turn");
        match pick_free_intersection(&self.pos, &mut self.rng) {
            Some(at) => {
                let captured = self.pos.put_stone(at);
                debug!(at = %str_coord(at), captured, "computer move");
                if captured != 0 {
                    self.finish(Outcome::Lost);
                }
                ComputerTurn::Played { at, captured }
            }
            None => {
                self.pos.switch_player();
                let outcome = if self.pos.stone_count(COMPUTER) == 0 {
                    Outcome::Won
                } else {
                    Outcome::Lost
                };
                self.finish(outcome);
                ComputerTurn::NoMove
            }
        }
    }

    /// Give up a running match.
    pub fn resign(&mut self) {
        if !self.is_over() {
            self.finish(Outcome::Abandoned);
        }
    }

    fn computer_can_capture(&self) -> bool {
        self.pos.who() == COMPUTER
            && Board::points().any(|pt| {
                self.pos.intersection(pt) == Intersection::Free && self.pos.would_capture(pt)
            })
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.outcome = Some(outcome);
        info!(
            ?outcome,
            steps = self.steps,
            prisoners = self.prisoners,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "match over"
        );
    }
}
