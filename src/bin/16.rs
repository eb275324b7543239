//! Day 16: a beam of light bouncing around a contraption of mirrors and
//! splitters. How many tiles end up energized?

use std::process::ExitCode;

use grid_search::debugln;
use grid_search::direction::Direction;
use grid_search::grid::Pos;
use grid_search::search::{Beam, Contraption};
use grid_search::Result;

/// Returns the number of tiles energized by a beam entering the top left
/// corner heading right.
pub fn part_one(contraption: &Contraption) -> Result<usize> {
    let energized = contraption.energize(Beam::new(Pos::ZERO, Direction::East))?;
    Ok(energized.tiles)
}

/// Returns the largest number of tiles energized by a beam entering from any
/// edge tile.
pub fn part_two(contraption: &Contraption) -> Result<usize> {
    Ok(contraption
        .best_entry()
        .map_or(0, |(_, energized)| energized.tiles))
}

fn main() -> ExitCode {
    grid_search::cli::run(|input, args| {
        let contraption = Contraption::parse(input)?;
        debugln!("\n{contraption}");
        let one = grid_search::solve!(1, part_one, &contraption, args.expect_one);
        let two = grid_search::solve!(2, part_two, &contraption, args.expect_two);
        Ok(one && two)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Contraption {
        let input = grid_search::read_file("examples", 16);
        Contraption::parse(&input).unwrap()
    }

    #[test]
    fn test_part_one() {
        assert_eq!(part_one(&example()).unwrap(), 46);
    }

    #[test]
    fn test_part_two() {
        assert_eq!(part_two(&example()).unwrap(), 51);
    }
}
