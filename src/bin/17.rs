//! Day 17: pushing crucibles of lava through a city while losing as little
//! heat as possible.

use std::process::ExitCode;

use grid_search::debugln;
use grid_search::grid::{Grid, Pos};
use grid_search::search::{render_path, Crucible, RunLimits, Trace};
use grid_search::Result;

/// At most three blocks in a straight line, turning whenever it likes.
const CRUCIBLE: RunLimits = RunLimits::new(0, 3);
/// At least four and at most ten blocks in a straight line, stopping included.
const ULTRA_CRUCIBLE: RunLimits = RunLimits::new(4, 10);

fn min_heat_loss(city: &Grid<u8>, crucible: Crucible<'_>) -> Result<usize> {
    // Only reconstruct the route when someone is going to look at it.
    let trace = if log::log_enabled!(log::Level::Debug) {
        Trace::Keep
    } else {
        Trace::Omit
    };

    let route = crucible.route(Pos::ZERO, trace)?;
    if let Some(steps) = &route.steps {
        debugln!("\n{}", render_path(city, steps));
    }
    Ok(route.cost as usize)
}

pub fn part_one(city: &Grid<u8>) -> Result<usize> {
    min_heat_loss(city, Crucible::new(city, CRUCIBLE))
}

pub fn part_two(city: &Grid<u8>) -> Result<usize> {
    min_heat_loss(city, Crucible::new(city, ULTRA_CRUCIBLE).settling())
}

fn main() -> ExitCode {
    grid_search::cli::run(|input, args| {
        let city = Grid::parse_digits(input)?;
        let one = grid_search::solve!(1, part_one, &city, args.expect_one);
        let two = grid_search::solve!(2, part_two, &city, args.expect_two);
        Ok(one && two)
    })
}
