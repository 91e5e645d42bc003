//! Go position: the board plus the side to move.
//!
//! This module holds the rule engine:
//! - Boundary-safe intersection queries
//! - Hypothetical evaluation (would a stone be captured, would it capture)
//! - The legality rule: no suicide unless the move captures (there is no ko)
//! - Move commitment with removal of captured enemy chains
//!
//! Hypothetical queries take `&self` and work on a copy of the board, so they
//! can be called any number of times without changing the position.

use tracing::debug;

use crate::board::{Board, Color, Intersection, Point, column_letter, neighbors};
use crate::constants::{BOARD_H, BOARD_W};

/// Why a proposed move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move: point is off the board")]
    OffBoard,
    #[error("illegal move: point not free")]
    Occupied,
    #[error("illegal move: suicide")]
    Suicide,
    #[error("not your turn")]
    OutOfTurn,
    #[error("the game is over")]
    GameOver,
}

/// A Go position (board state and side to move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    white_to_move: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Empty board, Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Color::Black)
    }

    /// Start from an arbitrary stone layout.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self {
            board,
            white_to_move: to_move == Color::White,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// What `pt` holds; [`Intersection::OffBoard`] outside the grid.
    pub fn intersection(&self, pt: Point) -> Intersection {
        self.board.get(pt)
    }

    /// The side to move.
    pub fn who(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn enemy(&self) -> Color {
        self.who().opp()
    }

    /// Would a stone of the side to move at `pt` belong to a chain with no
    /// liberties?
    ///
    /// Only the stone at `pt` is added; nothing is removed first, so a move
    /// that captures can still report `true` here (see [`Self::is_legal`]).
    ///
    /// # Panics
    /// If `pt` is off the board.
    pub fn would_be_captured(&self, pt: Point) -> bool {
        assert!(Board::on_board(pt), "would_be_captured off the board at {pt:?}");
        let mut scratch = self.board.clone();
        scratch.place(pt, self.who());
        !scratch.has_liberty(&scratch.chain(pt))
    }

    /// Would a stone of the side to move at `pt` leave at least one adjacent
    /// enemy chain without liberties?
    ///
    /// # Panics
    /// If `pt` is off the board.
    pub fn would_capture(&self, pt: Point) -> bool {
        assert!(Board::on_board(pt), "would_capture off the board at {pt:?}");
        let enemy = Intersection::Occupied(self.enemy());
        let mut scratch = self.board.clone();
        scratch.place(pt, self.who());
        neighbors(pt)
            .into_iter()
            .filter(|&n| scratch.get(n) == enemy)
            .any(|n| !scratch.has_liberty(&scratch.chain(n)))
    }

    /// A move is legal on a free point unless it is suicide; the suicide rule
    /// is waived when the move captures.
    pub fn is_legal(&self, pt: Point) -> bool {
        self.intersection(pt).is_free() && (!self.would_be_captured(pt) || self.would_capture(pt))
    }

    /// Every legal point for the side to move, in row-major scan order.
    pub fn legal_moves(&self) -> Vec<Point> {
        Board::points().filter(|&pt| self.is_legal(pt)).collect()
    }

    /// Place a stone of the side to move at `pt`, remove every enemy chain
    /// left without liberties, then hand the turn over.
    ///
    /// Legality is not re-checked; callers validate with [`Self::is_legal`]
    /// first (or use [`Self::try_put_stone`]). Returns the number of stones
    /// removed.
    ///
    /// # Panics
    /// If `pt` is not a free on-board point.
    pub fn put_stone(&mut self, pt: Point) -> usize {
        assert!(
            self.intersection(pt).is_free(),
            "put_stone on {:?} at {pt:?}",
            self.intersection(pt)
        );
        let color = self.who();
        let enemy = Intersection::Occupied(self.enemy());
        self.board.place(pt, color);

        let mut to_remove: Vec<Point> = Vec::new();
        for n in neighbors(pt) {
            // Two neighbors may belong to the same chain.
            if self.board.get(n) != enemy || to_remove.contains(&n) {
                continue;
            }
            let chain = self.board.chain(n);
            if !self.board.has_liberty(&chain) {
                to_remove.extend(chain);
            }
        }

        for &r in &to_remove {
            self.board.remove(r);
        }
        if !to_remove.is_empty() {
            debug!(
                player = %color,
                at = %str_coord(pt),
                captured = to_remove.len(),
                "stones captured"
            );
        }

        self.switch_player();
        to_remove.len()
    }

    /// Validate then commit a move.
    pub fn try_put_stone(&mut self, pt: Point) -> Result<usize, MoveError> {
        match self.intersection(pt) {
            Intersection::OffBoard => return Err(MoveError::OffBoard),
            Intersection::Occupied(_) => return Err(MoveError::Occupied),
            Intersection::Free => {}
        }
        if !self.is_legal(pt) {
            return Err(MoveError::Suicide);
        }
        Ok(self.put_stone(pt))
    }

    /// Number of `color` stones on the board.
    pub fn stone_count(&self, color: Color) -> usize {
        self.board.count(color)
    }

    /// Hand the turn over without placing a stone.
    pub fn switch_player(&mut self) {
        self.white_to_move = !self.white_to_move;
    }
}

/// Parse a vertex such as `"D4"` into a point.
///
/// Columns are letters from `A` skipping `I`; rows count from 1 at the bottom
/// edge. Returns `None` for anything that is not an on-board vertex.
pub fn parse_coord(s: &str) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == 'I' {
        return None;
    }
    let mut col = (col_char as u8 - b'A') as usize;
    if col_char > 'I' {
        col -= 1;
    }

    let rest = chars.as_str();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: usize = rest.parse().ok()?;
    if col >= BOARD_W || row == 0 || row > BOARD_H {
        return None;
    }
    Some((col as i32, (BOARD_H - row) as i32))
}

/// Convert an on-board point to a vertex string (e.g. `"D4"`).
pub fn str_coord((x, y): Point) -> String {
    format!("{}{}", column_letter(x as usize), BOARD_H as i32 - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setpos(black: &[Point], white: &[Point], to_move: Color) -> Position {
        let mut board = Board::new();
        for &pt in black {
            board.place(pt, Color::Black);
        }
        for &pt in white {
            board.place(pt, Color::White);
        }
        Position::from_board(board, to_move)
    }

    #[test]
    fn test_empty_position() {
        let pos = Position::new();
        assert_eq!(pos.who(), Color::Black);
        assert_eq!(pos.enemy(), Color::White);
        assert_eq!(pos.stone_count(Color::Black) + pos.stone_count(Color::White), 0);
    }

    #[test]
    fn test_put_stone_basic() {
        let mut pos = Position::new();
        assert_eq!(pos.put_stone((3, 3)), 0);
        assert_eq!(pos.intersection((3, 3)), Intersection::Occupied(Color::Black));
        assert_eq!(pos.who(), Color::White);
    }

    #[test]
    fn test_corner_is_legal_on_empty_board() {
        let pos = Position::new();
        assert!(!pos.would_be_captured((0, 0)));
        assert!(pos.is_legal((0, 0)));
    }

    #[test]
    fn test_suicide_in_corner() {
        // White to move; A corner point enclosed by two black stones.
        let pos = setpos(&[(1, 0), (0, 1)], &[], Color::White);
        assert!(pos.would_be_captured((0, 0)));
        assert!(!pos.would_capture((0, 0)));
        assert!(!pos.is_legal((0, 0)));
        // Black may fill its own eye-like point.
        let pos = setpos(&[(1, 0), (0, 1)], &[], Color::Black);
        assert!(!pos.would_be_captured((0, 0)));
    }

    #[test]
    fn test_suicide_waived_when_capturing() {
        //   . O X
        //   O X .
        //   X
        // Black at (0,0) has no liberties of its own but takes both white
        // stones' last liberty.
        let pos = setpos(&[(2, 0), (1, 1), (0, 2)], &[(1, 0), (0, 1)], Color::Black);
        assert!(pos.would_be_captured((0, 0)));
        assert!(pos.would_capture((0, 0)));
        assert!(pos.is_legal((0, 0)));

        let mut pos = pos;
        assert_eq!(pos.put_stone((0, 0)), 2);
        assert_eq!(pos.stone_count(Color::White), 0);
    }

    #[test]
    fn test_hypotheticals_do_not_mutate() {
        let pos = setpos(&[(0, 0)], &[(1, 0)], Color::White);
        let before = pos.clone();
        for _ in 0..3 {
            pos.would_be_captured((0, 1));
            pos.would_capture((0, 1));
            pos.is_legal((5, 5));
        }
        assert_eq!(pos, before);
    }

    #[test]
    fn test_capture_removes_group() {
        // Two black stones in the corner, White fills the last liberty.
        let mut pos = setpos(&[(0, 0), (1, 0)], &[(2, 0), (0, 1)], Color::White);
        assert!(pos.would_capture((1, 1)));
        let captured = pos.put_stone((1, 1));
        assert_eq!(captured, 2);
        assert!(pos.intersection((0, 0)).is_free());
        assert!(pos.intersection((1, 0)).is_free());
        assert_eq!(pos.stone_count(Color::Black), 0);
        assert_eq!(pos.who(), Color::Black);
    }

    #[test]
    fn test_capture_counts_shared_chain_once() {
        // The black chain touches (2,1) from above and from the left.
        //   O X X O
        //   O X . O
        //   . O
        let mut pos = setpos(
            &[(1, 0), (2, 0), (1, 1)],
            &[(0, 0), (3, 0), (0, 1), (1, 2), (3, 1)],
            Color::White,
        );
        let captured = pos.put_stone((2, 1));
        assert_eq!(captured, 3);
        assert_eq!(pos.stone_count(Color::Black), 0);
    }

    #[test]
    fn test_switch_player_keeps_board() {
        let mut pos = setpos(&[(4, 4)], &[], Color::Black);
        let board = pos.board().clone();
        pos.switch_player();
        assert_eq!(pos.who(), Color::White);
        assert_eq!(pos.board(), &board);
    }

    #[test]
    fn test_try_put_stone_errors() {
        let mut pos = setpos(&[(1, 0), (0, 1)], &[], Color::White);
        assert_eq!(pos.try_put_stone((-1, 0)), Err(MoveError::OffBoard));
        assert_eq!(pos.try_put_stone((1, 0)), Err(MoveError::Occupied));
        assert_eq!(pos.try_put_stone((0, 0)), Err(MoveError::Suicide));
        assert_eq!(pos.try_put_stone((5, 5)), Ok(0));
        assert_eq!(MoveError::Suicide.to_string(), "illegal move: suicide");
    }

    #[test]
    #[should_panic]
    fn test_put_stone_on_occupied_panics() {
        let mut pos = setpos(&[(2, 2)], &[], Color::White);
        pos.put_stone((2, 2));
    }

    #[test]
    #[should_panic]
    fn test_would_be_captured_off_board_panics() {
        Position::new().would_be_captured((-1, 0));
    }

    #[test]
    #[should_panic]
    fn test_would_capture_off_board_panics() {
        Position::new().would_capture((0, BOARD_H as i32));
    }

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for pt in Board::points() {
            let s = str_coord(pt);
            assert_eq!(parse_coord(&s), Some(pt), "Failed roundtrip for {s}");
        }
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("A1"), Some((0, BOARD_H as i32 - 1)));
        assert_eq!(parse_coord("j1"), Some((8, BOARD_H as i32 - 1)));
        assert_eq!(parse_coord("I5"), None);
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("pass"), None);
        assert_eq!(parse_coord(""), None);
        assert_eq!(parse_coord("A+5"), None);
        assert_eq!(parse_coord("A 5"), None);
    }
}
