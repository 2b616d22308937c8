#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::OnceLock;

use itertools::Itertools;
use optimal_subarchitectures::{generators, Graph, Vertex};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub type VertexSets = BTreeSet<BTreeSet<Vertex>>;

pub fn as_sets(sets: Vec<Vec<Vertex>>) -> VertexSets {
    sets.into_iter().map(|s| s.into_iter().collect()).collect()
}

/// Every `k`-subset of the vertices whose induced subgraph is connected.
pub fn brute_force_connected_sets(graph: &Graph, k: usize) -> VertexSets {
    graph
        .vertices()
        .combinations(k)
        .filter(|set| graph.induced(set).is_connected())
        .map(|set| set.into_iter().collect())
        .collect()
}

/// Isomorphism by trying every bijection.
pub fn brute_force_isomorphic(a: &Graph, b: &Graph) -> bool {
    a.num_edges() == b.num_edges() && brute_force_embeds(a, b)
}

/// Seeded random topology; `seed` picks both the size and the density.
pub fn random_graph(seed: u64, max_vertices: usize) -> Graph {
    use rand::Rng;
    let mut rng = StdRng::seed_from_u64(seed);
    let n = rng.gen_range(1..=max_vertices);
    let density = rng.gen_range(0.15..0.75);
    generators::random(n, density, &mut rng)
}

pub fn bowtie() -> Graph {
    Graph::from_edges(0..5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)])
}

/// Whether `pattern` maps into `target` by some bijection of equal-sized
/// vertex sets that preserves every pattern edge.
pub fn brute_force_embeds(pattern: &Graph, target: &Graph) -> bool {
    if pattern.num_vertices() != target.num_vertices() {
        return false;
    }
    let p_vertices: Vec<Vertex> = pattern.vertices().collect();
    let t_vertices: Vec<Vertex> = target.vertices().collect();
    t_vertices.iter().copied().permutations(t_vertices.len()).any(|image| {
        pattern.edges().all(|(u, v)| {
            let iu = p_vertices.iter().position(|&x| x == u).unwrap_or_default();
            let iv = p_vertices.iter().position(|&x| x == v).unwrap_or_default();
            target.has_edge(image[iu], image[iv])
        })
    })
}
