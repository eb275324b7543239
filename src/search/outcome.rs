use rayon::prelude::*;

use super::state::StateKey;
use crate::grid::Pos;

/// The cheapest route found by [`cheapest_route`](super::cheapest_route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<S, C> {
    /// Sum of the costs of every state entered after the seed.
    pub cost: C,
    /// The target state the route ends in.
    pub end: S,
    /// How many distinct states were expanded before reaching the target.
    pub expanded: usize,
    /// Every state entered after the seed, when the search kept a trace.
    pub steps: Option<Vec<S>>,
}

impl<S: StateKey, C> Route<S, C> {
    /// The positions entered along the route. Empty when no trace was kept.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.steps.iter().flatten().map(StateKey::pos)
    }
}

/// Runs `run` once per seed on the rayon pool and returns the seed with the
/// largest result.
///
/// Runs share nothing but what `run` borrows, so they must only read it.
pub fn max_over<S, T, F>(seeds: Vec<S>, run: F) -> Option<(S, T)>
where
    S: Send,
    T: Ord + Send,
    F: Fn(&S) -> T + Sync,
{
    seeds
        .into_par_iter()
        .map(|seed| {
            let result = run(&seed);
            (seed, result)
        })
        .max_by(|(_, a), (_, b)| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_over_keeps_the_best_seed() {
        let best = max_over(vec![3, 9, 4, 1], |&n| n * 2);
        assert_eq!(best, Some((9, 18)));
        assert_eq!(max_over(Vec::<u32>::new(), |&n| n), None);
    }
}
