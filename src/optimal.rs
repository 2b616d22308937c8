//! Selection of the optimal antichain among candidate subgraphs.
//!
//! A candidate is dominated when it embeds into another candidate that does
//! not embed back. Two candidates embedding into each other are isomorphic;
//! of such a pair only the earlier one survives. Every candidate is judged
//! against the full input, which yields the same antichain as any sequential
//! elimination order since embedding is transitive.

use rayon::prelude::*;
use tracing::debug;

use crate::mapping::is_subgraph_monomorphic;
use crate::progress::{Progress, Stage};
use crate::{Config, Graph};

/// Whether `candidate` at position `idx` is dominated by `other` at `jdx`.
fn dominated_by(candidate: &Graph, idx: usize, other: &Graph, jdx: usize) -> bool {
    if candidate.num_vertices() > other.num_vertices() || candidate.num_edges() > other.num_edges()
    {
        return false;
    }
    if !is_subgraph_monomorphic(candidate, other) {
        return false;
    }
    let same_shape = candidate.num_vertices() == other.num_vertices()
        && candidate.num_edges() == other.num_edges();
    // Equal counts plus an embedding means the two are isomorphic.
    !same_shape || jdx < idx
}

/// Keeps the candidates not dominated by any other candidate, in input order.
pub fn select_optimal(candidates: Vec<Graph>, config: &Config, progress: &dyn Progress) -> Vec<Graph> {
    progress.start(Stage::OptimalSelection, candidates.len());

    let survives = |idx: usize| {
        let candidate = &candidates[idx];
        let dominated = candidates
            .iter()
            .enumerate()
            .any(|(jdx, other)| jdx != idx && dominated_by(candidate, idx, other, jdx));
        progress.advance(Stage::OptimalSelection, 1);
        !dominated
    };
    let keep: Vec<bool> = if config.parallel {
        (0..candidates.len()).into_par_iter().map(survives).collect()
    } else {
        (0..candidates.len()).map(survives).collect()
    };

    let total = candidates.len();
    let optimal: Vec<Graph> = candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect();

    progress.finish(Stage::OptimalSelection, optimal.len());
    debug!(candidates = total, optimal = optimal.len(), "dominated candidates pruned");
    optimal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;
    use crate::NoProgress;

    fn sequential() -> Config {
        Config::default().with_parallel(false)
    }

    #[test]
    fn test_path_dominated_by_triangle() {
        let triangle = generators::complete(3);
        let path = generators::path(3);
        let optimal = select_optimal(vec![path, triangle.clone()], &sequential(), &NoProgress);
        assert_eq!(optimal, vec![triangle]);
    }

    #[test]
    fn test_incomparable_candidates_survive() {
        // Star and path on four vertices have three edges each and neither embeds.
        let star = generators::star(3);
        let path = generators::path(4);
        let optimal = select_optimal(vec![star.clone(), path.clone()], &Config::default(), &NoProgress);
        assert_eq!(optimal, vec![star, path]);
    }

    #[test]
    fn test_isomorphic_duplicates_keep_first() {
        let first = generators::cycle(4);
        let second = Graph::from_edges([7, 8, 9, 10], [(7, 9), (9, 8), (8, 10), (10, 7)]);
        let optimal = select_optimal(vec![first.clone(), second], &sequential(), &NoProgress);
        assert_eq!(optimal, vec![first]);
    }

    #[test]
    fn test_chain_keeps_only_top() {
        let chain = vec![
            generators::path(4),
            generators::complete(4),
            generators::cycle(4),
        ];
        let optimal = select_optimal(chain, &Config::default(), &NoProgress);
        assert_eq!(optimal, vec![generators::complete(4)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(select_optimal(Vec::new(), &Config::default(), &NoProgress).is_empty());
    }
}
