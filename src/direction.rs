use std::fmt;

use crate::grid::Pos;

/// One of the four grid directions.
///
/// `y` increases going down, so [`Direction::North`] is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The unit vector for one step in this direction.
    #[inline]
    pub fn offset(self) -> Pos {
        match self {
            Self::North => -Pos::Y,
            Self::East => Pos::X,
            Self::South => Pos::Y,
            Self::West => -Pos::X,
        }
    }

    /// Turns 90 degrees counter-clockwise (as drawn on screen).
    #[inline]
    pub fn rotate_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Turns 90 degrees clockwise (as drawn on screen).
    #[inline]
    pub fn rotate_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns true when moving along the x axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    #[inline]
    pub fn is_perpendicular_to(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_are_inverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_left().rotate_right(), dir);
            assert_eq!(dir.rotate_left().rotate_left(), dir.reverse());
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(Direction::North.offset(), Pos::new(0, -1));
        assert_eq!(Direction::East.rotate_right().offset(), Pos::new(0, 1));
        for dir in Direction::ALL {
            assert_eq!(dir.offset() + dir.reverse().offset(), Pos::ZERO);
        }
    }

    #[test]
    fn perpendicular() {
        assert!(Direction::North.is_perpendicular_to(Direction::East));
        assert!(!Direction::North.is_perpendicular_to(Direction::South));
        assert!(!Direction::West.is_perpendicular_to(Direction::West));
    }
}
