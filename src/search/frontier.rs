use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::fmt;

use num_traits::Zero;
use smallvec::SmallVec;

use super::outcome::Route;
use super::state::{StateKey, VisitedSet};
use crate::debugln;

/// Transitions of a search where every move has a non-negative cost.
pub trait WeightedRules {
    type State: StateKey + Ord;
    type Cost: Copy + Ord + Zero + fmt::Debug;

    /// The states reachable in one move, each with the cost of entering it.
    fn successors(&self, state: &Self::State) -> SmallVec<[(Self::State, Self::Cost); 4]>;

    fn is_target(&self, state: &Self::State) -> bool;
}

/// Transitions of a search where every move costs the same.
pub trait UnweightedRules {
    type State: StateKey;

    fn successors(&self, state: &Self::State) -> SmallVec<[Self::State; 4]>;
}

/// Whether a search remembers how it reached each state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Keep,
    #[default]
    Omit,
}

/// An entry in the priority queue.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate<S, C> {
    cost: C,
    state: S,
    parent: Option<S>,
}

impl<S: Ord, C: Ord> Ord for Candidate<S, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, so that `BinaryHeap` pops the cheapest candidate first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
            .then_with(|| other.parent.cmp(&self.parent))
    }
}

impl<S: Ord, C: Ord> PartialOrd for Candidate<S, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the cheapest route from any of the seeds to a target state.
///
/// Duplicate candidates are pushed freely and discarded when popped if their
/// state was already expanded. Costs are charged on entering a state, so seeds
/// start at zero. Returns `None` if the frontier runs dry first.
pub fn cheapest_route<R, I>(rules: &R, seeds: I, trace: Trace) -> Option<Route<R::State, R::Cost>>
where
    R: WeightedRules,
    I: IntoIterator<Item = R::State>,
{
    let mut frontier = BinaryHeap::new();
    let mut visited = VisitedSet::new();
    let mut parents = HashMap::new();

    for seed in seeds {
        debugln!("Seeding {seed:?}");
        frontier.push(Candidate {
            cost: R::Cost::zero(),
            state: seed,
            parent: None,
        });
    }

    while let Some(Candidate {
        cost,
        state,
        parent,
    }) = frontier.pop()
    {
        if !visited.insert(state) {
            continue;
        }
        log::trace!("Expanding {state:?} at cost {cost:?}");

        if let (Trace::Keep, Some(parent)) = (trace, parent) {
            parents.insert(state, parent);
        }

        if rules.is_target(&state) {
            debugln!("Reached {state:?} at cost {cost:?} after {} states", visited.len());
            let steps = match trace {
                Trace::Keep => Some(unwind(&parents, state)),
                Trace::Omit => None,
            };
            return Some(Route {
                cost,
                end: state,
                expanded: visited.len(),
                steps,
            });
        }

        for (next, step_cost) in rules.successors(&state) {
            if visited.contains(&next) {
                continue;
            }
            frontier.push(Candidate {
                cost: cost + step_cost,
                state: next,
                parent: Some(state),
            });
        }
    }

    debugln!("Frontier exhausted after {} states", visited.len());
    None
}

/// Walks the parent links back from `end`. The seed is not part of the result.
fn unwind<S: StateKey>(parents: &HashMap<S, S>, end: S) -> Vec<S> {
    let mut steps = Vec::new();
    let mut current = end;
    while let Some(&parent) = parents.get(&current) {
        steps.push(current);
        current = parent;
    }
    steps.reverse();
    steps
}

/// Expands every state reachable from the seeds, first in first out.
///
/// Returns the set of states visited, seeds included.
pub fn flood<R, I>(rules: &R, seeds: I) -> VisitedSet<R::State>
where
    R: UnweightedRules,
    I: IntoIterator<Item = R::State>,
{
    let mut visited = VisitedSet::new();
    let mut worklist = VecDeque::new();

    for seed in seeds {
        if visited.insert(seed) {
            worklist.push_back(seed);
        }
    }

    while let Some(state) = worklist.pop_front() {
        for next in rules.successors(&state) {
            if visited.insert(next) {
                worklist.push_back(next);
            }
        }
    }

    log::trace!("Flood visited {} states", visited.len());
    visited
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;
    use crate::direction::Direction;
    use crate::grid::{Grid, Pos};
    use crate::search::state::SearchState;

    /// Free movement over a weighted grid, ignoring direction.
    struct Walk<'a> {
        grid: &'a Grid<u8>,
        target: Pos,
    }

    impl WeightedRules for Walk<'_> {
        type State = SearchState;
        type Cost = u32;

        fn successors(&self, state: &SearchState) -> SmallVec<[(SearchState, u32); 4]> {
            Direction::ALL
                .into_iter()
                .filter_map(|dir| {
                    let pos = state.pos + dir.offset();
                    let weight = *self.grid.get(pos)?;
                    Some((SearchState::seed(pos, Direction::North), u32::from(weight)))
                })
                .collect()
        }

        fn is_target(&self, state: &SearchState) -> bool {
            state.pos == self.target
        }
    }

    impl UnweightedRules for Walk<'_> {
        type State = SearchState;

        fn successors(&self, state: &SearchState) -> SmallVec<[SearchState; 4]> {
            let pos = state.pos + Pos::X;
            if self.grid.in_bounds(pos) {
                smallvec![SearchState::seed(pos, Direction::North)]
            } else {
                smallvec![]
            }
        }
    }

    #[test]
    fn candidates_pop_cheapest_first() {
        let state = SearchState::seed(Pos::ZERO, Direction::North);
        let mut heap = BinaryHeap::new();
        for cost in [5u32, 1, 3] {
            heap.push(Candidate {
                cost,
                state,
                parent: None,
            });
        }
        let costs: Vec<u32> = std::iter::from_fn(|| heap.pop().map(|c| c.cost)).collect();
        assert_eq!(costs, vec![1, 3, 5]);
    }

    #[test]
    fn seed_wins_ties_against_equal_states() {
        let state = SearchState::seed(Pos::ZERO, Direction::North);
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            cost: 0u32,
            state,
            parent: Some(SearchState::seed(Pos::X, Direction::North)),
        });
        heap.push(Candidate {
            cost: 0u32,
            state,
            parent: None,
        });
        assert_eq!(heap.pop().unwrap().parent, None);
    }

    #[test]
    fn cheapest_route_avoids_heavy_cells() {
        let grid = Grid::parse_digits("191\n111").unwrap();
        let walk = Walk {
            grid: &grid,
            target: Pos::new(2, 0),
        };
        let seed = SearchState::seed(Pos::ZERO, Direction::North);
        let route = cheapest_route(&walk, [seed], Trace::Keep).unwrap();
        assert_eq!(route.cost, 4);
        let positions: Vec<Pos> = route.positions().collect();
        assert_eq!(
            positions,
            vec![Pos::new(0, 1), Pos::new(1, 1), Pos::new(2, 1), Pos::new(2, 0)]
        );
    }

    #[test]
    fn cheapest_route_without_trace() {
        let grid = Grid::parse_digits("12\n34").unwrap();
        let walk = Walk {
            grid: &grid,
            target: Pos::new(1, 1),
        };
        let seed = SearchState::seed(Pos::ZERO, Direction::North);
        let route = cheapest_route(&walk, [seed], Trace::Omit).unwrap();
        assert_eq!(route.cost, 6);
        assert!(route.steps.is_none());
    }

    #[test]
    fn unreachable_target() {
        let grid = Grid::parse_digits("12\n34").unwrap();
        let walk = Walk {
            grid: &grid,
            target: Pos::new(5, 5),
        };
        let seed = SearchState::seed(Pos::ZERO, Direction::North);
        assert!(cheapest_route(&walk, [seed], Trace::Omit).is_none());
        assert!(cheapest_route(&walk, [], Trace::Omit).is_none());
    }

    #[test]
    fn flood_runs_until_the_worklist_is_empty() {
        let grid = Grid::parse_digits("1111\n1111").unwrap();
        let walk = Walk {
            grid: &grid,
            target: Pos::ZERO,
        };
        let seeds = [
            SearchState::seed(Pos::new(1, 0), Direction::North),
            SearchState::seed(Pos::new(2, 0), Direction::North),
        ];
        let visited = flood(&walk, seeds);
        assert_eq!(visited.len(), 3);
        assert_eq!(visited.distinct_positions(&grid), 3);
    }
}
