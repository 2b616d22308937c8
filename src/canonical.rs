//! Canonical hashing and isomorphism deduplication.
//!
//! The hash is a Weisfeiler-Lehman color refinement: every vertex starts with
//! its degree as color, and each round recolors a vertex with the digest of
//! its color and the sorted colors of its neighbors. The sorted color
//! multiset of every round is folded into the graph digest, together with the
//! vertex and edge counts. Isomorphic graphs always hash alike; some
//! non-isomorphic ones (regular graphs of equal order and degree, for one)
//! collide as well, which is what [`CollisionCheck::Exact`] guards against.

use std::collections::HashMap;
use std::fmt;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::{CollisionCheck, Config};
use crate::mapping::is_isomorphic;
use crate::progress::{Progress, Stage};
use crate::{Graph, Vertex};

/// A 256-bit isomorphism-invariant digest of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalHash([u8; 32]);

impl fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

type Color = [u8; 32];

fn digest(domain: &[u8], parts: &[&[u8]]) -> Color {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn absorb_multiset(hasher: &mut Sha256, colors: &[Color]) {
    let mut sorted = colors.to_vec();
    sorted.sort_unstable();
    hasher.update(b"ROUND");
    hasher.update((sorted.len() as u64).to_le_bytes());
    for color in &sorted {
        hasher.update(color);
    }
}

/// Computes the canonical hash of `graph` with `iterations` refinement rounds.
pub fn canonical_hash(graph: &Graph, iterations: usize) -> CanonicalHash {
    let vertices: Vec<Vertex> = graph.vertices().collect();
    let neighbors: Vec<Vec<usize>> = vertices
        .iter()
        .map(|&v| {
            graph
                .neighbors(v)
                .filter_map(|w| vertices.binary_search(&w).ok())
                .collect()
        })
        .collect();

    let mut colors: Vec<Color> = neighbors
        .iter()
        .map(|n| digest(b"WL_INIT", &[&(n.len() as u64).to_le_bytes()[..]]))
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(b"SUBARCH:WL:v1");
    hasher.update((vertices.len() as u64).to_le_bytes());
    hasher.update((graph.num_edges() as u64).to_le_bytes());
    absorb_multiset(&mut hasher, &colors);

    for round in 0..iterations {
        let round_tag = (round as u64).to_le_bytes();
        colors = neighbors
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let mut around: Vec<&Color> = n.iter().map(|&j| &colors[j]).collect();
                around.sort_unstable();
                let around: Vec<u8> = around.into_iter().flatten().copied().collect();
                digest(b"WL_ROUND", &[&round_tag[..], &colors[i][..], &around[..]])
            })
            .collect();
        absorb_multiset(&mut hasher, &colors);
    }

    CanonicalHash(hasher.finalize().into())
}

/// Incremental isomorphism-class filter: keeps the first graph offered of
/// every class and rejects the rest.
#[derive(Debug)]
pub struct Deduplicator {
    iterations: usize,
    check: CollisionCheck,
    classes: HashMap<CanonicalHash, Vec<usize>>,
    kept: Vec<Graph>,
    collisions: usize,
}

impl Deduplicator {
    pub fn new(config: &Config) -> Self {
        Self {
            iterations: config.wl_iterations,
            check: config.collision_check,
            classes: HashMap::new(),
            kept: Vec::new(),
            collisions: 0,
        }
    }

    /// Offers `graph`; returns whether it was kept as a new representative.
    pub fn insert(&mut self, graph: Graph) -> bool {
        let hash = canonical_hash(&graph, self.iterations);
        let members = self.classes.entry(hash).or_default();

        if !members.is_empty() {
            match self.check {
                CollisionCheck::HashOnly => return false,
                CollisionCheck::Exact => {
                    if members.iter().any(|&idx| is_isomorphic(&self.kept[idx], &graph)) {
                        return false;
                    }
                    self.collisions += 1;
                    debug!(%hash, "hash collision between non-isomorphic candidates");
                }
            }
        }

        members.push(self.kept.len());
        self.kept.push(graph);
        true
    }

    pub fn extend<I: IntoIterator<Item = Graph>>(&mut self, graphs: I) {
        for graph in graphs {
            self.insert(graph);
        }
    }

    /// Number of representatives kept so far.
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Hash hits that turned out not to be isomorphic.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn representatives(&self) -> &[Graph] {
        &self.kept
    }

    pub fn into_representatives(self) -> Vec<Graph> {
        self.kept
    }
}

/// Keeps the first subgraph of every isomorphism class, in input order.
pub fn deduplicate_with(
    subgraphs: Vec<Graph>,
    config: &Config,
    progress: &dyn Progress,
) -> Vec<Graph> {
    progress.start(Stage::IsomorphismElimination, subgraphs.len());
    let mut classes = Deduplicator::new(config);
    for subgraph in subgraphs {
        classes.insert(subgraph);
        progress.advance(Stage::IsomorphismElimination, 1);
    }
    progress.finish(Stage::IsomorphismElimination, classes.len());
    classes.into_representatives()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;
    use crate::NoProgress;

    fn k33() -> Graph {
        Graph::from_edges(0..6, (0..3).flat_map(|a| (3..6).map(move |b| (a, b))))
    }

    fn prism() -> Graph {
        Graph::from_edges(
            0..6,
            [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (0, 3), (1, 4), (2, 5)],
        )
    }

    #[test]
    fn test_hash_ignores_labels() {
        let a = Graph::from_edges(0..4, [(0, 1), (1, 2), (2, 3)]);
        let b = Graph::from_edges([9, 4, 7, 1], [(7, 1), (1, 9), (9, 4)]);
        assert_eq!(canonical_hash(&a, 8), canonical_hash(&b, 8));
    }

    #[test]
    fn test_hash_separates_shapes() {
        let path = generators::path(4);
        let star = generators::star(3);
        let cycle = generators::cycle(4);
        assert_ne!(canonical_hash(&path, 8), canonical_hash(&star, 8));
        assert_ne!(canonical_hash(&path, 8), canonical_hash(&cycle, 8));
        assert_ne!(canonical_hash(&path, 0), canonical_hash(&generators::path(5), 0));
    }

    #[test]
    fn test_regular_graphs_collide() {
        assert_eq!(canonical_hash(&k33(), 8), canonical_hash(&prism(), 8));
    }

    #[test]
    fn test_hash_only_merges_collisions() {
        let config = Config::default().with_collision_check(CollisionCheck::HashOnly);
        let kept = deduplicate_with(vec![k33(), prism()], &config, &NoProgress);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_exact_keeps_collisions_apart() {
        let mut classes = Deduplicator::new(&Config::default());
        assert!(classes.insert(k33()));
        assert!(classes.insert(prism()));
        assert!(!classes.insert(prism().normalized()));
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.representatives(), [k33(), prism()]);
        assert_eq!(classes.collisions(), 1);
    }

    #[test]
    fn test_keeps_first_representative() {
        let first = Graph::from_edges([5, 6, 7], [(5, 6), (6, 7)]);
        let second = Graph::from_edges([0, 1, 2], [(0, 2), (2, 1)]);
        let kept = deduplicate_with(vec![first.clone(), second], &Config::default(), &NoProgress);
        assert_eq!(kept, vec![first]);
    }
}
