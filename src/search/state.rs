use std::cmp::Ordering;
use std::collections::{hash_set, HashSet};
use std::fmt;
use std::hash::{self, Hash};

use bitvec::bitvec;

use crate::direction::Direction;
use crate::grid::{Grid, Pos};

/// The identity of a node in a search graph: a grid position plus whatever
/// else distinguishes two arrivals at that position.
pub trait StateKey: Copy + Eq + Hash + fmt::Debug {
    fn pos(&self) -> Pos;
}

/// A crucible state: where it is, which way it is heading, and how many
/// consecutive moves it has made in that direction.
///
/// `run` is `0` only for seed states, which have not moved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub pos: Pos,
    pub dir: Direction,
    pub run: u8,
}

impl SearchState {
    #[inline]
    pub fn new(pos: Pos, dir: Direction, run: u8) -> Self {
        Self { pos, dir, run }
    }

    /// A state that has not moved yet.
    #[inline]
    pub fn seed(pos: Pos, dir: Direction) -> Self {
        Self::new(pos, dir, 0)
    }

    #[inline]
    fn sort_key(&self) -> (i32, i32, Direction, u8) {
        (self.pos.y, self.pos.x, self.dir, self.run)
    }
}

impl hash::Hash for SearchState {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl StateKey for SearchState {
    #[inline]
    fn pos(&self) -> Pos {
        self.pos
    }
}

/// Set of states expanded so far during one search run.
#[derive(Debug, Clone)]
pub struct VisitedSet<S> {
    states: HashSet<S>,
}

impl<S> Default for VisitedSet<S> {
    fn default() -> Self {
        Self {
            states: HashSet::new(),
        }
    }
}

impl<S: StateKey> VisitedSet<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the state visited. Returns `false` if an equal state already was.
    #[inline]
    pub fn insert(&mut self, state: S) -> bool {
        self.states.insert(state)
    }

    #[inline]
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// The stored state equal to `state`, which may differ from it in fields
    /// excluded from equality.
    #[inline]
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, S> {
        self.states.iter()
    }

    /// Number of distinct grid positions among the visited states, ignoring
    /// any other part of the state.
    pub fn distinct_positions<T>(&self, grid: &Grid<T>) -> usize {
        let mut seen = bitvec![0; grid.len()];
        for state in &self.states {
            if let Some(index) = grid.index_of(state.pos()) {
                seen.set(index, true);
            }
        }
        seen.count_ones()
    }
}

impl<'a, S> IntoIterator for &'a VisitedSet<S> {
    type Item = &'a S;
    type IntoIter = hash_set::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
