use std::fmt;

use crate::{Error, Result};

/// A position in the grid, with `x` increasing to the right and `y` increasing
/// going down.
pub type Pos = glam::IVec2;

type Cells<T> = ::grid::Grid<T>;

/// An immutable, rectangular 2d grid.
///
/// `(0, 0)` is the top left corner. Every accessor takes a [`Pos`], which may
/// lie outside the grid; only [`Grid::at`] treats that as an error.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cells: Cells<T>,
}

impl Grid<char> {
    /// Parses newline separated rows of characters.
    pub fn build(text: &str) -> Result<Self> {
        Self::parse_with(text, |_, c| Ok(c))
    }
}

impl Grid<u8> {
    /// Parses a grid of single digit weights.
    pub fn parse_digits(text: &str) -> Result<Self> {
        Self::parse_with(text, |(x, y), cell| match cell.to_digit(10) {
            Some(digit) => Ok(digit as u8),
            None => Err(Error::InvalidCell { x, y, cell }),
        })
    }
}

impl<T> Grid<T> {
    /// Parses newline separated rows, converting each character with `cell`,
    /// which receives the `(x, y)` of the character.
    pub fn parse_with<F>(text: &str, mut cell: F) -> Result<Self>
    where
        F: FnMut((usize, usize), char) -> Result<T>,
    {
        let rows = text
            .lines()
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, c)| cell((x, y), c))
                    .collect::<Result<Vec<T>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Builds a grid from its rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(Error::EmptyGrid),
        };

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(Error::RaggedRow {
                row,
                expected: width,
                found,
            });
        }

        let cells = Cells::from_vec(rows.into_iter().flatten().collect(), width);
        Ok(Self { cells })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.cols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.rows()
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the position is in the grid.
    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.make_row_col(pos).is_some()
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        let (row, col) = self.make_row_col(pos)?;
        self.cells.get(row, col)
    }

    /// Like [`Grid::get`], but reports a position outside the grid as an error.
    pub fn at(&self, pos: Pos) -> Result<&T> {
        self.get(pos).ok_or(Error::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Dense index of the position in row-major order.
    #[inline]
    pub fn index_of(&self, pos: Pos) -> Option<usize> {
        let (row, col) = self.make_row_col(pos)?;
        Some(row * self.width() + col)
    }

    /// All positions of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height())
            .flat_map(move |row| (0..self.width()).map(move |col| Self::make_pos(row, col)))
    }

    /// The bottom right corner.
    pub fn last_pos(&self) -> Pos {
        Self::make_pos(self.height() - 1, self.width() - 1)
    }

    /// Returns the first position (in row-major order) holding `value`.
    pub fn find(&self, value: &T) -> Option<Pos>
    where
        T: PartialEq,
    {
        self.positions().find(|&pos| self.get(pos) == Some(value))
    }

    /// Returns a copy of this grid with one cell replaced.
    pub fn with_cell(&self, pos: Pos, value: T) -> Result<Self>
    where
        T: Clone,
    {
        self.at(pos)?;
        let mut copy = self.clone();
        if let Some((row, col)) = self.make_row_col(pos) {
            if let Some(cell) = copy.cells.get_mut(row, col) {
                *cell = value;
            }
        }
        Ok(copy)
    }

    #[inline(always)]
    fn make_pos(row: usize, col: usize) -> Pos {
        // Grids are parsed from text, so they never come near `i32::MAX`.
        Pos::new(col as i32, row as i32)
    }

    #[inline(always)]
    fn make_row_col(&self, pos: Pos) -> Option<(usize, usize)> {
        let Ok(row) = usize::try_from(pos.y) else {
            return None;
        };
        let Ok(col) = usize::try_from(pos.x) else {
            return None;
        };
        (row < self.height() && col < self.width()).then_some((row, col))
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first_row = true;
        for row in 0..self.height() {
            if !first_row {
                writeln!(f)?;
            }

            for col in 0..self.width() {
                if let Some(cell) = self.cells.get(row, col) {
                    write!(f, "{cell}")?;
                }
            }

            first_row = false;
        }
        Ok(())
    }
}
