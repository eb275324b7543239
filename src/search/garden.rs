use std::hash;

use smallvec::SmallVec;

use super::frontier::{flood, UnweightedRules};
use super::state::StateKey;
use crate::direction::Direction;
use crate::grid::{Grid, Pos};
use crate::{debugln, Error, Result};

const START: char = 'S';
const ROCK: char = '#';

/// A garden plot reached after some number of steps.
#[derive(Debug, Clone, Copy)]
pub struct Plot {
    pub pos: Pos,
    pub steps: u32,
}

impl PartialEq for Plot {
    fn eq(&self, other: &Self) -> bool {
        // Exclude steps from the equality check.
        self.pos == other.pos
    }
}

impl Eq for Plot {}

impl hash::Hash for Plot {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Exclude steps from the hash.
        self.pos.x.hash(state);
        self.pos.y.hash(state);
    }
}

impl StateKey for Plot {
    #[inline]
    fn pos(&self) -> Pos {
        self.pos
    }
}

/// An elf wandering a walled garden, one plot per step.
#[derive(Debug, Clone)]
pub struct Garden<'g> {
    grid: &'g Grid<char>,
    budget: u32,
}

impl<'g> Garden<'g> {
    pub fn new(grid: &'g Grid<char>, budget: u32) -> Self {
        Self { grid, budget }
    }

    /// The plot marked `S`.
    pub fn start(&self) -> Result<Pos> {
        self.grid.find(&START).ok_or(Error::MissingMarker(START))
    }

    /// Counts the plots the elf could be standing on after exactly `budget`
    /// steps.
    ///
    /// Stepping back and forth costs two steps, so a plot first reached after
    /// `n <= budget` steps counts when `n` has the same parity as the budget.
    pub fn reachable_in_exactly(&self) -> Result<usize> {
        let start = Plot {
            pos: self.start()?,
            steps: 0,
        };
        let visited = flood(self, [start]);
        let reachable = visited
            .iter()
            .filter(|plot| plot.steps % 2 == self.budget % 2)
            .count();
        debugln!(
            "{} of {} plots within {} steps end on the right parity",
            reachable,
            visited.len(),
            self.budget
        );
        Ok(reachable)
    }

    #[inline]
    fn is_open(&self, pos: Pos) -> bool {
        self.grid.get(pos).is_some_and(|&c| c != ROCK)
    }
}

impl UnweightedRules for Garden<'_> {
    type State = Plot;

    fn successors(&self, plot: &Plot) -> SmallVec<[Plot; 4]> {
        if plot.steps >= self.budget {
            return SmallVec::new();
        }
        Direction::ALL
            .into_iter()
            .map(|dir| plot.pos + dir.offset())
            .filter(|&pos| self.is_open(pos))
            .map(|pos| Plot {
                pos,
                steps: plot.steps + 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const GARDEN: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(2, 4)]
    #[case(6, 16)]
    #[case(64, 42)]
    fn example(#[case] steps: u32, #[case] expected: usize) {
        let grid = Grid::build(GARDEN).unwrap();
        let garden = Garden::new(&grid, steps);
        assert_eq!(garden.reachable_in_exactly().unwrap(), expected);
    }

    #[test]
    fn first_arrival_is_the_shortest() {
        let grid = Grid::build(GARDEN).unwrap();
        let garden = Garden::new(&grid, 100);
        let start = garden.start().unwrap();
        let visited = flood(&garden, [Plot { pos: start, steps: 0 }]);
        for plot in &visited {
            let bfs = pathfinding::directed::bfs::bfs(
                &(start.x, start.y),
                |&(x, y)| {
                    Direction::ALL
                        .into_iter()
                        .map(move |dir| Pos::new(x, y) + dir.offset())
                        .filter(|&pos| garden.is_open(pos))
                        .map(|pos| (pos.x, pos.y))
                        .collect::<Vec<_>>()
                },
                |&(x, y)| Pos::new(x, y) == plot.pos,
            )
            .unwrap();
            assert_eq!(plot.steps as usize, bfs.len() - 1);
        }
    }

    #[test]
    fn missing_start() {
        let grid = Grid::build("...\n.#.").unwrap();
        let garden = Garden::new(&grid, 3);
        assert!(matches!(
            garden.reachable_in_exactly(),
            Err(Error::MissingMarker('S'))
        ));
    }
}
