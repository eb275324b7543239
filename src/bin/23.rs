//! Day 23: the longest scenic hike through a forest, never stepping on the
//! same tile twice.

use std::process::ExitCode;

use grid_search::debugln;
use grid_search::search::{Slopes, TrailMap};
use grid_search::Result;

fn longest_hike(map: &TrailMap, slopes: Slopes) -> Result<usize> {
    let hike = map.longest_hike(slopes)?;
    debugln!("{slopes:?} slopes: compared {} hikes", hike.hikes);
    Ok(hike.steps)
}

/// Slopes are icy: stepping onto one means the next step goes downhill.
pub fn part_one(map: &TrailMap) -> Result<usize> {
    longest_hike(map, Slopes::Icy)
}

pub fn part_two(map: &TrailMap) -> Result<usize> {
    longest_hike(map, Slopes::Dry)
}

fn main() -> ExitCode {
    grid_search::cli::run(|input, args| {
        let map = TrailMap::parse(input)?;
        let one = grid_search::solve!(1, part_one, &map, args.expect_one);
        let two = grid_search::solve!(2, part_two, &map, args.expect_two);
        Ok(one && two)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> TrailMap {
        let input = grid_search::read_file("examples", 23);
        TrailMap::parse(&input).unwrap()
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&example()).unwrap(), 94);
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&example()).unwrap(), 154);
    }
}
