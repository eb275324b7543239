//! Frontier driven searches over a [`Grid`](crate::grid::Grid).
//!
//! A search is a set of rules ([`WeightedRules`] or [`UnweightedRules`])
//! that turn one [`StateKey`] into the next ones, plus a scheduler that
//! expands states until it runs out or reaches a target:
//!
//! * [`cheapest_route`] pops the cheapest candidate first (Dijkstra).
//! * [`flood`] expands everything reachable, first in first out.
//!
//! [`TrailMap::longest_hike`] is the odd one out: it wants the longest route,
//! so it follows every hike to its end instead.

mod beam;
mod crucible;
mod frontier;
mod garden;
mod hike;
mod outcome;
mod state;

pub use beam::{Beam, Contraption, Energized, Tile};
pub use crucible::{render_path, Crucible, RunLimits};
pub use frontier::{cheapest_route, flood, Trace, UnweightedRules, WeightedRules};
pub use garden::{Garden, Plot};
pub use hike::{Ground, LongestHike, Slopes, TrailMap};
pub use outcome::{max_over, Route};
pub use state::{SearchState, StateKey, VisitedSet};
