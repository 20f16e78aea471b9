use serde::{Deserialize, Serialize};

/// A cell coordinate on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// `|dx| + |dy|`, used when looking for the nearest target.
    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when `other` sits inside the square of half-width `range` around `self`.
    pub fn within_box(self, other: Position, range: i32) -> bool {
        (self.x - other.x).abs() <= range && (self.y - other.y).abs() <= range
    }

    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_both_axes() {
        let a = Position::new(1, 1);
        assert_eq!(a.manhattan(Position::new(4, -1)), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn box_test_is_per_axis() {
        let a = Position::new(5, 5);
        assert!(a.within_box(Position::new(6, 6), 1));
        assert!(!a.within_box(Position::new(7, 5), 1));
        // Manhattan 4, but each axis is within 2
        assert!(a.within_box(Position::new(7, 7), 2));
    }

    #[test]
    fn bounds_exclude_far_edge() {
        assert!(Position::new(0, 0).in_bounds(10, 10));
        assert!(Position::new(9, 9).in_bounds(10, 10));
        assert!(!Position::new(10, 0).in_bounds(10, 10));
        assert!(!Position::new(0, -1).in_bounds(10, 10));
    }
}
