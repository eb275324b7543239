use std::collections::HashMap;
use std::fmt;

use bitvec::bitvec;
use bitvec::vec::BitVec;

use crate::direction::Direction;
use crate::grid::{Grid, Pos};
use crate::{debugln, Error, Result};

/// One tile of a hiking map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ground {
    Path,
    Forest,
    /// A slope that sends hikers downhill in the given direction.
    Slope(Direction),
}

impl Ground {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Path),
            '#' => Some(Self::Forest),
            '^' => Some(Self::Slope(Direction::North)),
            '>' => Some(Self::Slope(Direction::East)),
            'v' => Some(Self::Slope(Direction::South)),
            '<' => Some(Self::Slope(Direction::West)),
            _ => None,
        }
    }
}

impl fmt::Display for Ground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "."),
            Self::Forest => write!(f, "#"),
            Self::Slope(dir) => write!(f, "{dir}"),
        }
    }
}

/// How slopes treat a hiker standing on them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Slopes {
    /// The next step from a slope must go downhill.
    #[default]
    Icy,
    /// Slopes are walked like any other path.
    Dry,
}

/// The longest hike found, from the entrance to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestHike {
    pub steps: usize,
    /// Every tile entered, in order. The entrance is not part of it.
    pub path: Vec<Pos>,
    /// Number of complete hikes compared.
    pub hikes: usize,
}

/// A stretch of trail from one junction to the next, walked one way.
#[derive(Debug, Clone)]
struct Leg {
    to: usize,
    cells: Vec<Pos>,
}

/// The trails collapsed onto their junctions: the entrance is junction 0, the
/// exit junction 1, and every tile with three or more open neighbours follows.
#[derive(Debug)]
struct Trails {
    junctions: Vec<Pos>,
    legs: Vec<Leg>,
    outgoing: Vec<Vec<usize>>,
}

const ENTRANCE: usize = 0;
const EXIT: usize = 1;

/// A hike in progress.
#[derive(Debug, Clone)]
struct Hike {
    at: usize,
    steps: usize,
    /// Junctions already passed; a hike never enters a tile twice.
    seen: BitVec,
    legs: Vec<usize>,
}

impl Hike {
    fn start(junctions: usize) -> Self {
        let mut seen = bitvec![0; junctions];
        seen.set(ENTRANCE, true);
        Self {
            at: ENTRANCE,
            steps: 0,
            seen,
            legs: Vec::new(),
        }
    }

    fn take(&self, index: usize, leg: &Leg) -> Option<Self> {
        if self.seen[leg.to] {
            return None;
        }
        let mut next = self.clone();
        next.seen.set(leg.to, true);
        next.at = leg.to;
        next.steps += leg.cells.len();
        next.legs.push(index);
        Some(next)
    }
}

/// A forest map with a single entrance in its top row and a single exit in
/// its bottom row.
#[derive(Debug, Clone)]
pub struct TrailMap {
    ground: Grid<Ground>,
}

impl TrailMap {
    pub fn parse(text: &str) -> Result<Self> {
        let ground = Grid::parse_with(text, |(x, y), cell| {
            Ground::from_char(cell).ok_or(Error::InvalidCell { x, y, cell })
        })?;
        Ok(Self { ground })
    }

    #[inline]
    pub fn ground(&self) -> &Grid<Ground> {
        &self.ground
    }

    /// The open tile in the top row.
    pub fn entrance(&self) -> Result<Pos> {
        self.opening(0)
    }

    /// The open tile in the bottom row.
    pub fn exit(&self) -> Result<Pos> {
        self.opening(self.ground.height() - 1)
    }

    /// Finds the longest hike from the entrance to the exit that never steps
    /// on the same tile twice.
    ///
    /// Every hike is followed to its end, so this is exponential in the
    /// number of junctions.
    pub fn longest_hike(&self, slopes: Slopes) -> Result<LongestHike> {
        let entrance = self.entrance()?;
        let exit = self.exit()?;
        if entrance == exit {
            return Ok(LongestHike {
                steps: 0,
                path: Vec::new(),
                hikes: 1,
            });
        }

        let trails = self.trails(entrance, exit, slopes);
        debugln!(
            "{} junctions joined by {} legs",
            trails.junctions.len(),
            trails.legs.len()
        );

        let mut worklist = vec![Hike::start(trails.junctions.len())];
        let mut longest: Option<Hike> = None;
        let mut hikes = 0;
        while let Some(hike) = worklist.pop() {
            if hike.at == EXIT {
                hikes += 1;
                if !longest.as_ref().is_some_and(|best| best.steps >= hike.steps) {
                    longest = Some(hike);
                }
                continue;
            }

            worklist.extend(
                trails.outgoing[hike.at]
                    .iter()
                    .filter_map(|&index| hike.take(index, &trails.legs[index])),
            );
        }

        let longest = longest.ok_or_else(|| Error::no_path_to(exit))?;
        debugln!("Longest of {hikes} hikes takes {} steps", longest.steps);
        let path = longest
            .legs
            .iter()
            .flat_map(|&index| trails.legs[index].cells.iter().copied())
            .collect();
        Ok(LongestHike {
            steps: longest.steps,
            path,
            hikes,
        })
    }

    fn opening(&self, row: usize) -> Result<Pos> {
        self.ground
            .positions()
            .filter(|pos| pos.y as usize == row)
            .find(|&pos| self.is_open(pos))
            .ok_or(Error::NoOpening { row })
    }

    #[inline]
    fn is_open(&self, pos: Pos) -> bool {
        self.ground.get(pos).is_some_and(|&g| g != Ground::Forest)
    }

    /// The tile reached by leaving `pos` towards `dir`, if the move is allowed.
    fn step(&self, pos: Pos, dir: Direction, slopes: Slopes) -> Option<Pos> {
        if let (Slopes::Icy, Some(Ground::Slope(downhill))) = (slopes, self.ground.get(pos)) {
            if *downhill != dir {
                return None;
            }
        }
        let next = pos + dir.offset();
        self.is_open(next).then_some(next)
    }

    fn trails(&self, entrance: Pos, exit: Pos, slopes: Slopes) -> Trails {
        let mut junctions = vec![entrance, exit];
        junctions.extend(self.ground.positions().filter(|&pos| {
            pos != entrance
                && pos != exit
                && self.is_open(pos)
                && Direction::ALL
                    .into_iter()
                    .filter(|dir| self.is_open(pos + dir.offset()))
                    .count()
                    >= 3
        }));
        let index: HashMap<Pos, usize> = junctions
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos, i))
            .collect();

        let mut legs = Vec::new();
        let mut outgoing = vec![Vec::new(); junctions.len()];
        for (from, &pos) in junctions.iter().enumerate() {
            for dir in Direction::ALL {
                if let Some(leg) = self.walk(pos, dir, slopes, &index) {
                    outgoing[from].push(legs.len());
                    legs.push(leg);
                }
            }
        }

        Trails {
            junctions,
            legs,
            outgoing,
        }
    }

    /// Follows a corridor from a junction until the next one. Returns `None`
    /// for dead ends and corridors a slope will not let through.
    fn walk(
        &self,
        from: Pos,
        dir: Direction,
        slopes: Slopes,
        junctions: &HashMap<Pos, usize>,
    ) -> Option<Leg> {
        let mut previous = from;
        let mut pos = self.step(from, dir, slopes)?;
        let mut cells = vec![pos];
        loop {
            if let Some(&to) = junctions.get(&pos) {
                return Some(Leg { to, cells });
            }
            // Between junctions there is at most one way forward.
            let next = Direction::ALL
                .into_iter()
                .filter_map(|dir| self.step(pos, dir, slopes))
                .find(|&next| next != previous)?;
            previous = pos;
            pos = next;
            cells.push(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    const FOREST: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#v#.#.#v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#";

    const LOOP: &str = "\
#.###
#...#
#.#.#
#...#
###.#";

    /// Tile by tile depth first search, for comparison.
    fn brute_force(map: &TrailMap, slopes: Slopes) -> Option<usize> {
        fn go(
            map: &TrailMap,
            slopes: Slopes,
            pos: Pos,
            exit: Pos,
            seen: &mut HashSet<Pos>,
        ) -> Option<usize> {
            if pos == exit {
                return Some(0);
            }
            Direction::ALL
                .into_iter()
                .filter_map(|dir| {
                    let next = map.step(pos, dir, slopes)?;
                    if !seen.insert(next) {
                        return None;
                    }
                    let rest = go(map, slopes, next, exit, seen);
                    seen.remove(&next);
                    rest.map(|rest| rest + 1)
                })
                .max()
        }

        let entrance = map.entrance().unwrap();
        let mut seen = HashSet::from([entrance]);
        go(map, slopes, entrance, map.exit().unwrap(), &mut seen)
    }

    #[rstest]
    #[case(FOREST, Slopes::Icy, 94)]
    #[case(FOREST, Slopes::Dry, 154)]
    #[case(LOOP, Slopes::Icy, 6)]
    #[case(LOOP, Slopes::Dry, 6)]
    #[case("#.#\n#.#\n#.#", Slopes::Icy, 2)]
    #[case("#.#\n#^#\n#.#", Slopes::Dry, 2)]
    #[case(".", Slopes::Icy, 0)]
    fn longest(#[case] text: &str, #[case] slopes: Slopes, #[case] expected: usize) {
        let map = TrailMap::parse(text).unwrap();
        let hike = map.longest_hike(slopes).unwrap();
        assert_eq!(hike.steps, expected);
        assert_eq!(hike.path.len(), expected);
    }

    #[rstest]
    #[case(Slopes::Icy)]
    #[case(Slopes::Dry)]
    fn path_never_revisits_a_tile(#[case] slopes: Slopes) {
        let map = TrailMap::parse(FOREST).unwrap();
        let hike = map.longest_hike(slopes).unwrap();
        let entrance = map.entrance().unwrap();

        let distinct: HashSet<Pos> = hike.path.iter().copied().chain([entrance]).collect();
        assert_eq!(distinct.len(), hike.path.len() + 1);
        assert_eq!(hike.path.last(), Some(&map.exit().unwrap()));

        let mut previous = entrance;
        for &pos in &hike.path {
            let dir = Direction::ALL
                .into_iter()
                .find(|dir| previous + dir.offset() == pos)
                .unwrap();
            assert_eq!(map.step(previous, dir, slopes), Some(pos), "{previous} -> {pos}");
            previous = pos;
        }
    }

    #[rstest]
    #[case(Slopes::Icy)]
    #[case(Slopes::Dry)]
    fn matches_tile_by_tile_search(#[case] slopes: Slopes) {
        let map = TrailMap::parse(FOREST).unwrap();
        assert_eq!(
            Some(map.longest_hike(slopes).unwrap().steps),
            brute_force(&map, slopes)
        );
    }

    #[test]
    fn icy_slopes_cut_off_the_exit() {
        let map = TrailMap::parse("#.#\n#^#\n#.#").unwrap();
        assert!(matches!(
            map.longest_hike(Slopes::Icy),
            Err(Error::NoPathFound { x: 1, y: 2 })
        ));
    }

    #[test]
    fn counts_every_complete_hike() {
        let map = TrailMap::parse(LOOP).unwrap();
        // Around the loop clockwise or counterclockwise.
        assert_eq!(map.longest_hike(Slopes::Dry).unwrap().hikes, 2);
    }

    #[test]
    fn malformed_maps() {
        assert!(matches!(
            TrailMap::parse("#.#\n#x#"),
            Err(Error::InvalidCell { x: 1, y: 1, cell: 'x' })
        ));
        let walled = TrailMap::parse("###\n#.#\n#.#").unwrap();
        assert!(matches!(
            walled.longest_hike(Slopes::Dry),
            Err(Error::NoOpening { row: 0 })
        ));
        let map = TrailMap::parse("#.#\n#.#").unwrap();
        assert_eq!(map.ground().to_string(), "#.#\n#.#");
    }
}
