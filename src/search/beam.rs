use std::fmt;

use smallvec::{smallvec, SmallVec};

use super::frontier::{flood, UnweightedRules};
use super::outcome::max_over;
use super::state::StateKey;
use crate::direction::Direction;
use crate::grid::{Grid, Pos};
use crate::{debugln, Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Empty,
    /// `/`
    ForwardMirror,
    /// `\`
    BackMirror,
    /// `|`
    VerticalSplitter,
    /// `-`
    HorizontalSplitter,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Empty),
            '/' => Some(Self::ForwardMirror),
            '\\' => Some(Self::BackMirror),
            '|' => Some(Self::VerticalSplitter),
            '-' => Some(Self::HorizontalSplitter),
            _ => None,
        }
    }

    /// The directions a beam leaves this tile in after entering it heading
    /// `dir`.
    pub fn deflect(self, dir: Direction) -> SmallVec<[Direction; 2]> {
        match self {
            Self::ForwardMirror if dir.is_horizontal() => smallvec![dir.rotate_left()],
            Self::ForwardMirror => smallvec![dir.rotate_right()],
            Self::BackMirror if dir.is_horizontal() => smallvec![dir.rotate_right()],
            Self::BackMirror => smallvec![dir.rotate_left()],
            Self::VerticalSplitter if dir.is_horizontal() => {
                smallvec![Direction::North, Direction::South]
            }
            Self::HorizontalSplitter if !dir.is_horizontal() => {
                smallvec![Direction::West, Direction::East]
            }
            Self::Empty | Self::VerticalSplitter | Self::HorizontalSplitter => smallvec![dir],
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Empty => '.',
            Self::ForwardMirror => '/',
            Self::BackMirror => '\\',
            Self::VerticalSplitter => '|',
            Self::HorizontalSplitter => '-',
        };
        write!(f, "{c}")
    }
}

/// The head of a beam of light: the tile it is on and where it is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Beam {
    pub pos: Pos,
    pub dir: Direction,
}

impl Beam {
    #[inline]
    pub fn new(pos: Pos, dir: Direction) -> Self {
        Self { pos, dir }
    }
}

impl StateKey for Beam {
    #[inline]
    fn pos(&self) -> Pos {
        self.pos
    }
}

/// The outcome of following a beam until every branch has left the grid or
/// started looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Energized {
    /// Distinct tiles at least one beam passed through.
    pub tiles: usize,
    /// Distinct (tile, direction) pairs seen.
    pub states: usize,
}

/// A grid of mirrors and splitters.
#[derive(Debug, Clone)]
pub struct Contraption {
    tiles: Grid<Tile>,
}

impl Contraption {
    pub fn parse(input: &str) -> Result<Self> {
        let tiles = Grid::parse_with(input, |(x, y), cell| {
            Tile::from_char(cell).ok_or(Error::InvalidCell { x, y, cell })
        })?;
        Ok(Self { tiles })
    }

    #[inline]
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Follows a beam that starts on `seed.pos`, heading `seed.dir`. The
    /// starting tile deflects the beam like any other.
    pub fn energize(&self, seed: Beam) -> Result<Energized> {
        self.tiles.at(seed.pos)?;
        Ok(self.follow(seed))
    }

    /// One beam per edge tile, pointing into the grid. Corner tiles get one
    /// beam for each of their two edges.
    pub fn entry_beams(&self) -> Vec<Beam> {
        let max_x = self.tiles.width() as i32 - 1;
        let max_y = self.tiles.height() as i32 - 1;

        let vertical = (0..=max_x).flat_map(|x| {
            [
                Beam::new(Pos::new(x, 0), Direction::South),
                Beam::new(Pos::new(x, max_y), Direction::North),
            ]
        });
        let horizontal = (0..=max_y).flat_map(|y| {
            [
                Beam::new(Pos::new(0, y), Direction::East),
                Beam::new(Pos::new(max_x, y), Direction::West),
            ]
        });
        vertical.chain(horizontal).collect()
    }

    /// Tries every entry beam and returns the one energizing the most tiles.
    pub fn best_entry(&self) -> Option<(Beam, Energized)> {
        let best = max_over(self.entry_beams(), |&seed| self.follow(seed));
        if let Some((beam, energized)) = &best {
            debugln!("Best entry {beam:?} energizes {energized:?}");
        }
        best
    }

    fn follow(&self, seed: Beam) -> Energized {
        let visited = flood(self, [seed]);
        Energized {
            tiles: visited.distinct_positions(&self.tiles),
            states: visited.len(),
        }
    }
}

impl UnweightedRules for Contraption {
    type State = Beam;

    fn successors(&self, beam: &Beam) -> SmallVec<[Beam; 4]> {
        let Some(tile) = self.tiles.get(beam.pos) else {
            return SmallVec::new();
        };
        tile.deflect(beam.dir)
            .into_iter()
            .map(|dir| Beam::new(beam.pos + dir.offset(), dir))
            .filter(|next| self.tiles.in_bounds(next.pos))
            .collect()
    }
}

impl fmt::Display for Contraption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tiles)
    }
}
