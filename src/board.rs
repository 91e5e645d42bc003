//! Board grid snapshot and connectivity primitives.
//!
//! The grid only ever stores free points and stones. Anything outside the
//! grid reads back as [`Intersection::OffBoard`], so neighbor walks never
//! need their own bounds checks.

use std::collections::VecDeque;
use std::fmt;

use crate::constants::{BOARD_H, BOARD_W, BOARDSIZE, DELTA};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A board coordinate `(x, y)`: column counted from the left edge, row
/// counted from the top edge. Points outside the grid are allowed and read
/// as [`Intersection::OffBoard`].
pub type Point = (i32, i32);

/// What a coordinate holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intersection {
    Free,
    Occupied(Color),
    /// Never stored; returned for coordinates outside the grid.
    OffBoard,
}

impl Intersection {
    pub fn is_free(self) -> bool {
        self == Intersection::Free
    }

    /// True for everything except a free point, i.e. for whatever takes a
    /// liberty away from an adjacent group.
    pub fn blocks_liberty(self) -> bool {
        !self.is_free()
    }
}

/// The four orthogonal neighbors of a point (Up, Right, Down, Left).
///
/// Neighbors of edge points lie off the board.
#[inline]
pub fn neighbors((x, y): Point) -> [Point; 4] {
    DELTA.map(|(dx, dy)| (x + dx, y + dy))
}

/// Column letter as used in board labels and GTP vertices (`I` is skipped).
pub fn column_letter(x: usize) -> char {
    let c = b'A' + x as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Color>; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARDSIZE],
        }
    }

    pub fn on_board((x, y): Point) -> bool {
        x >= 0 && y >= 0 && (x as usize) < BOARD_W && (y as usize) < BOARD_H
    }

    fn idx((x, y): Point) -> usize {
        y as usize * BOARD_W + x as usize
    }

    /// Boundary-safe read of a single point.
    pub fn get(&self, pt: Point) -> Intersection {
        if !Self::on_board(pt) {
            return Intersection::OffBoard;
        }
        match self.cells[Self::idx(pt)] {
            Some(color) => Intersection::Occupied(color),
            None => Intersection::Free,
        }
    }

    /// Put a stone on `pt`, replacing whatever was there.
    ///
    /// # Panics
    /// If `pt` is off the board.
    pub fn place(&mut self, pt: Point, color: Color) {
        assert!(Self::on_board(pt), "place off the board at {pt:?}");
        self.cells[Self::idx(pt)] = Some(color);
    }

    /// Clear `pt`.
    ///
    /// # Panics
    /// If `pt` is off the board.
    pub fn remove(&mut self, pt: Point) {
        assert!(Self::on_board(pt), "remove off the board at {pt:?}");
        self.cells[Self::idx(pt)] = None;
    }

    /// All on-board points in row-major order (top to bottom, left to right).
    pub fn points() -> impl Iterator<Item = Point> {
        (0..BOARD_H as i32).flat_map(|y| (0..BOARD_W as i32).map(move |x| (x, y)))
    }

    /// Compute the connected group containing `seed` under `joins`.
    ///
    /// The seed is always a member. A neighbor of a member becomes a member
    /// iff `joins` accepts what it holds. Off-board points are never entered.
    pub fn group<F>(&self, seed: Point, joins: F) -> Vec<Point>
    where
        F: Fn(Intersection) -> bool,
    {
        assert!(Self::on_board(seed), "group seed off the board at {seed:?}");
        let mut visited = [false; BOARDSIZE];
        let mut queue = VecDeque::from([seed]);
        let mut members = Vec::new();
        visited[Self::idx(seed)] = true;

        while let Some(pt) = queue.pop_front() {
            members.push(pt);
            for n in neighbors(pt) {
                if !Self::on_board(n) || visited[Self::idx(n)] {
                    continue;
                }
                if joins(self.get(n)) {
                    visited[Self::idx(n)] = true;
                    queue.push_back(n);
                }
            }
        }
        members
    }

    /// The maximal same-colored chain through `seed`.
    pub fn chain(&self, seed: Point) -> Vec<Point> {
        let color = self.get(seed);
        self.group(seed, |i| i == color)
    }

    /// Whether any member of `group` touches a free point.
    pub fn has_liberty(&self, group: &[Point]) -> bool {
        group
            .iter()
            .any(|&pt| neighbors(pt).iter().any(|&n| !self.get(n).blocks_liberty()))
    }

    /// Number of distinct free points adjacent to `group`.
    #[cfg(test)]
    pub(crate) fn liberties(&self, group: &[Point]) -> usize {
        let mut seen = [false; BOARDSIZE];
        let mut libs = 0;
        for &pt in group {
            for n in neighbors(pt) {
                if self.get(n).is_free() && !seen[Self::idx(n)] {
                    seen[Self::idx(n)] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Number of stones of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 0..BOARD_W {
            write!(f, "{} ", column_letter(x))?;
        }
        writeln!(f)?;
        for y in 0..BOARD_H {
            write!(f, "{:>2} ", BOARD_H - y)?;
            for x in 0..BOARD_W {
                let ch = match self.get((x as i32, y as i32)) {
                    Intersection::Occupied(Color::Black) => 'X',
                    Intersection::Occupied(Color::White) => 'O',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
