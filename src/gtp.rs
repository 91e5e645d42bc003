//! Go Text Protocol (GTP) front end.
//!
//! Lets the engine be driven by a GTP controller or a graphical board such as
//! Sabaki or GoGui. The computer side answers `genmove` with a uniformly
//! random legal move.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - only the compiled board size is accepted
//! - `clear_board`
//! - `play <color> <vertex>` - `pass` hands the turn over
//! - `genmove <color>`
//! - `showboard`
//! - `captures <color>` - stones captured by that color since `clear_board`

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::debug;

use crate::board::Color;
use crate::constants::{BOARD_H, BOARD_W};
use crate::playout::pick_free_intersection;
use crate::position::{Position, parse_coord, str_coord};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    pos: Position,
    rng: fastrand::Rng,
    black_captures: usize,
    white_captures: usize,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Create an engine whose `genmove` answers come from `rng`.
    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            pos: Position::new(),
            rng,
            black_captures: 0,
            white_captures: 0,
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading GTP command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            debug!(%command, ?args, success, "gtp");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n").context("writing GTP response")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(s: &str) -> Option<Color> {
        match s.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Make `color` the side to move.
    fn set_to_move(&mut self, color: Color) {
        if self.pos.who() != color {
            self.pos.switch_player();
        }
    }

    fn record_captures(&mut self, color: Color, captured: usize) {
        match color {
            Color::Black => self.black_captures += captured,
            Color::White => self.white_captures += captured,
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if size == BOARD_W && size == BOARD_H => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {BOARD_W} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.pos = Position::new();
                self.black_captures = 0;
                self.white_captures = 0;
                (true, String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = Self::parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                if vertex.eq_ignore_ascii_case("pass") {
                    self.set_to_move(color.opp());
                    return (true, String::new());
                }
                let Some(pt) = parse_coord(vertex) else {
                    return (false, "invalid vertex".to_string());
                };

                // A rejected move must leave the side to move untouched.
                let mut next = self.pos.clone();
                if next.who() != color {
                    next.switch_player();
                }
                if !next.is_legal(pt) {
                    return (false, "illegal move".to_string());
                }
                let captured = next.put_stone(pt);
                self.pos = next;
                self.record_captures(color, captured);
                (true, String::new())
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| Self::parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                self.set_to_move(color);
                match pick_free_intersection(&self.pos, &mut self.rng) {
                    Some(pt) => {
                        let captured = self.pos.put_stone(pt);
                        self.record_captures(color, captured);
                        (true, str_coord(pt))
                    }
                    None => {
                        self.pos.switch_player();
                        (true, "pass".to_string())
                    }
                }
            }

            "showboard" => (true, format!("\n{}", self.pos.board())),

            "captures" => match args.first().and_then(|c| Self::parse_color(c)) {
                Some(Color::Black) => (true, self.black_captures.to_string()),
                Some(Color::White) => (true, self.white_captures.to_string()),
                None => (false, "invalid color".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Intersection;

    fn engine() -> GtpEngine {
        GtpEngine::with_rng(fastrand::Rng::with_seed(9))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let (success, response) = engine().execute("name", &[]);
        assert!(success);
        assert_eq!(response, "speedgo");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["showboard"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        let (success, _) = engine.execute("boardsize", &[&BOARD_W.to_string()]);
        assert!(success);
        let (success, _) = engine.execute("boardsize", &["7"]);
        assert!(!success);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();
        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(success);
        let d4 = parse_coord("D4").unwrap();
        assert_eq!(engine.position().intersection(d4), Intersection::Occupied(Color::Black));
        assert_eq!(engine.position().who(), Color::White);

        let (success, response) = engine.execute("play", &["white", "D4"]);
        assert!(!success);
        assert_eq!(response, "illegal move");

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.position(), &Position::new());
        assert_eq!(engine.position().who(), Color::Black);
    }

    #[test]
    fn test_rejected_play_keeps_side_to_move() {
        let mut engine = engine();
        assert!(engine.execute("play", &["b", "D4"]).0);
        assert!(engine.execute("play", &["w", "E4"]).0);
        let before = engine.position().clone();

        let (success, response) = engine.execute("play", &["w", "D4"]);
        assert!(!success);
        assert_eq!(response, "illegal move");
        assert_eq!(engine.position().who(), Color::Black);
        assert_eq!(engine.position(), &before);
    }

    #[test]
    fn test_play_out_of_turn_switches_side() {
        let mut engine = engine();
        let (success, _) = engine.execute("play", &["w", "A1"]);
        assert!(success);
        assert_eq!(engine.position().who(), Color::Black);
    }

    #[test]
    fn test_play_capture_is_counted() {
        let mut engine = engine();
        for (color, vertex) in [("b", "A1"), ("w", "B1"), ("b", "J9"), ("w", "A2")] {
            let (success, _) = engine.execute("play", &[color, vertex]);
            assert!(success, "{color} {vertex}");
        }
        assert_eq!(engine.execute("captures", &["white"]), (true, "1".to_string()));
        assert_eq!(engine.execute("captures", &["black"]), (true, "0".to_string()));
    }

    #[test]
    fn test_genmove_plays_legal_move() {
        let mut engine = engine();
        let (success, vertex) = engine.execute("genmove", &["b"]);
        assert!(success);
        let pt = parse_coord(&vertex).expect("a vertex on an empty board");
        assert_eq!(engine.position().intersection(pt), Intersection::Occupied(Color::Black));
    }

    #[test]
    fn test_run_loop() {
        let mut engine = engine();
        let input = "1 name\n# comment\n\n2 play b C3\nfoo\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(input.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "=1 speedgo\n\n=2 \n\n? unknown command: foo\n\n= \n\n"
        );
    }
}
