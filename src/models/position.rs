//! Document positions and ranges
//!
//! Positions are 0-indexed (LSP standard). Ranges compare as closed intervals
//! on the (line, character) lexicographic order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Line weight used by [`Range::size`]; must exceed any realistic column count.
pub const LINE_WEIGHT: i64 = 10_000;

/// Position within a document (0-indexed, LSP standard)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Convert 1-indexed CLI input to 0-indexed position
    pub fn from_cli(line: u32, column: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            character: column.saturating_sub(1),
        }
    }

    /// Convert 0-indexed position to 1-indexed display position
    pub fn to_display(&self) -> (u32, u32) {
        (self.line + 1, self.character + 1)
    }

    /// Strictly earlier in the document than `other`
    pub fn is_before(&self, other: &Position) -> bool {
        self < other
    }

    /// Strictly later in the document than `other`
    pub fn is_after(&self, other: &Position) -> bool {
        self > other
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.to_display();
        write!(f, "{}:{}", line, column)
    }
}

/// Range within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Build from raw coordinates, mostly for tests and fixtures
    pub fn from_coords(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Self {
        Self {
            start: Position::new(start_line, start_char),
            end: Position::new(end_line, end_char),
        }
    }

    /// Inclusive containment on both endpoints
    pub fn contains(&self, pos: Position) -> bool {
        if pos.line < self.start.line || pos.line > self.end.line {
            return false;
        }
        if pos.line == self.start.line && pos.character < self.start.character {
            return false;
        }
        if pos.line == self.end.line && pos.character > self.end.character {
            return false;
        }
        true
    }

    /// Span magnitude for picking the most specific range. Smaller is tighter.
    pub fn size(&self) -> i64 {
        let lines = i64::from(self.end.line) - i64::from(self.start.line);
        let columns = i64::from(self.end.character) - i64::from(self.start.character);
        lines * LINE_WEIGHT + columns
    }

    /// True when the provider sent nothing usable (all zero or inverted)
    pub fn is_degenerate(&self) -> bool {
        *self == Range::default() || self.end < self.start
    }

    /// Lines covered, 0-indexed inclusive
    pub fn line_span(&self) -> (u32, u32) {
        (self.start.line, self.end.line.max(self.start.line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, character: u32) -> Position {
        Position::new(line, character)
    }

    #[test]
    fn test_position_ordering() {
        assert!(pos(1, 5).is_before(&pos(2, 0)));
        assert!(pos(2, 1).is_after(&pos(2, 0)));
        assert!(!pos(2, 0).is_after(&pos(2, 0)));
        assert!(!pos(2, 0).is_before(&pos(2, 0)));
    }

    #[test]
    fn test_from_cli_and_display() {
        let p = Position::from_cli(10, 5);
        assert_eq!(p, pos(9, 4));
        assert_eq!(p.to_display(), (10, 5));
        assert_eq!(p.to_string(), "10:5");
        assert_eq!(Position::from_cli(0, 0), pos(0, 0));
    }

    #[test]
    fn test_contains_interior_lines_ignore_columns() {
        let range = Range::from_coords(2, 8, 6, 1);
        assert!(range.contains(pos(3, 0)));
        assert!(range.contains(pos(5, 400)));
    }

    #[test]
    fn test_contains_boundaries_are_inclusive() {
        let range = Range::from_coords(2, 8, 6, 1);
        assert!(range.contains(pos(2, 8)));
        assert!(range.contains(pos(6, 1)));
        assert!(!range.contains(pos(2, 7)));
        assert!(!range.contains(pos(6, 2)));
        assert!(!range.contains(pos(1, 50)));
        assert!(!range.contains(pos(7, 0)));
    }

    #[test]
    fn test_contains_single_line_range() {
        let range = Range::from_coords(4, 2, 4, 9);
        assert!(range.contains(pos(4, 2)));
        assert!(range.contains(pos(4, 9)));
        assert!(!range.contains(pos(4, 10)));
    }

    #[test]
    fn test_size_prefers_fewer_lines() {
        let outer = Range::from_coords(0, 0, 10, 0);
        let inner = Range::from_coords(2, 2, 4, 2);
        assert_eq!(outer.size(), 100_000);
        assert_eq!(inner.size(), 20_000);
        assert!(inner.size() < outer.size());

        let wide_line = Range::from_coords(3, 0, 3, 9_000);
        let two_lines = Range::from_coords(3, 0, 4, 0);
        assert!(wide_line.size() < two_lines.size());
    }

    #[test]
    fn test_degenerate_ranges() {
        assert!(Range::default().is_degenerate());
        assert!(Range::from_coords(5, 0, 4, 0).is_degenerate());
        assert!(!Range::from_coords(0, 0, 0, 1).is_degenerate());
    }
}
