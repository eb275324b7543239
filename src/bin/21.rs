//! Day 21: an elf taking a fixed number of steps through a garden full of
//! rocks. Which plots could it end up on?

use std::process::ExitCode;

use grid_search::grid::Grid;
use grid_search::search::Garden;
use grid_search::Result;

const STEPS: u32 = 64;

/// Returns the number of plots reachable in exactly 64 steps.
pub fn part_one(garden: &Grid<char>) -> Result<usize> {
    Garden::new(garden, STEPS).reachable_in_exactly()
}

fn main() -> ExitCode {
    grid_search::cli::run(|input, args| {
        let garden = Grid::build(input)?;
        let one = grid_search::solve!(1, part_one, &garden, args.expect_one);
        Ok(one)
    })
}
