use itertools::Itertools;
use smallvec::SmallVec;

use super::frontier::{cheapest_route, Trace, WeightedRules};
use super::outcome::Route;
use super::state::SearchState;
use crate::direction::Direction;
use crate::grid::{Grid, Pos};
use crate::{debugln, Error, Result};

/// How far a crucible must, and may, travel in a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Consecutive moves required before turning.
    pub min: u8,
    /// Consecutive moves allowed before a turn is forced.
    pub max: u8,
}

impl RunLimits {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// The run length after moving from `state` towards `dir`, or `None` if
    /// that move is not allowed. Reversing is never allowed.
    #[inline]
    pub fn next_run(self, state: &SearchState, dir: Direction) -> Option<u8> {
        if dir == state.dir {
            (state.run < self.max).then(|| state.run + 1)
        } else if dir.is_perpendicular_to(state.dir) {
            (state.run >= self.min && self.max > 0).then_some(1)
        } else {
            None
        }
    }
}

/// A crucible rolling over a grid of heat loss digits.
///
/// Entering a block costs that block's digit; the starting block is free.
#[derive(Debug, Clone)]
pub struct Crucible<'g> {
    grid: &'g Grid<u8>,
    limits: RunLimits,
    target: Pos,
    settle: bool,
}

impl<'g> Crucible<'g> {
    /// A crucible headed for the bottom right corner of the grid.
    pub fn new(grid: &'g Grid<u8>, limits: RunLimits) -> Self {
        Self {
            grid,
            limits,
            target: grid.last_pos(),
            settle: false,
        }
    }

    pub fn with_target(mut self, target: Pos) -> Self {
        self.target = target;
        self
    }

    /// Only accept the target once the current run has reached the minimum,
    /// i.e. the crucible must be able to stop there.
    pub fn settling(mut self) -> Self {
        self.settle = true;
        self
    }

    /// Finds the route from `start` with the least total heat loss.
    pub fn route(&self, start: Pos, trace: Trace) -> Result<Route<SearchState, u32>> {
        self.grid.at(start)?;
        self.grid.at(self.target)?;

        // The crucible may leave the start in any direction.
        let seeds = Direction::ALL.map(|dir| SearchState::seed(start, dir));
        let route =
            cheapest_route(self, seeds, trace).ok_or_else(|| Error::no_path_to(self.target))?;
        debugln!(
            "Route from {start} to {} costs {} ({} states expanded)",
            self.target,
            route.cost,
            route.expanded
        );
        Ok(route)
    }
}

impl WeightedRules for Crucible<'_> {
    type State = SearchState;
    type Cost = u32;

    fn successors(&self, state: &SearchState) -> SmallVec<[(SearchState, u32); 4]> {
        [state.dir, state.dir.rotate_left(), state.dir.rotate_right()]
            .into_iter()
            .filter_map(|dir| {
                let run = self.limits.next_run(state, dir)?;
                let pos = state.pos + dir.offset();
                let heat_loss = *self.grid.get(pos)?;
                Some((SearchState::new(pos, dir, run), u32::from(heat_loss)))
            })
            .collect()
    }

    fn is_target(&self, state: &SearchState) -> bool {
        state.pos == self.target && (!self.settle || state.run >= self.limits.min)
    }
}

/// Draws the grid with an arrow on every block the route entered.
pub fn render_path(grid: &Grid<u8>, steps: &[SearchState]) -> String {
    let mut arrows: Vec<Option<Direction>> = vec![None; grid.len()];
    for step in steps {
        if let Some(index) = grid.index_of(step.pos) {
            arrows[index] = Some(step.dir);
        }
    }

    let cells: Vec<String> = grid
        .positions()
        .enumerate()
        .map(|(index, pos)| match (arrows[index], grid.get(pos)) {
            (Some(dir), _) => dir.to_string(),
            (None, Some(&heat_loss)) => heat_loss.to_string(),
            (None, None) => String::new(),
        })
        .collect();
    cells.chunks(grid.width()).map(|row| row.concat()).join("\n")
}
