//! Graph families and random topologies, labelled `0..n`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Graph, Vertex};

pub fn path(n: usize) -> Graph {
    Graph::from_edges(0..n, (1..n).map(|v| (v - 1, v)))
}

/// A cycle on `n` vertices; below three vertices this is a path.
pub fn cycle(n: usize) -> Graph {
    let mut graph = path(n);
    if n >= 3 {
        graph.add_edge(n - 1, 0);
    }
    graph
}

/// Center `0` joined to the leaves `1..=leaves`.
pub fn star(leaves: usize) -> Graph {
    Graph::from_edges(0..=leaves, (1..=leaves).map(|leaf| (0, leaf)))
}

pub fn complete(n: usize) -> Graph {
    Graph::from_edges(0..n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))))
}

/// A `rows` by `cols` grid; vertex `r * cols + c` sits at row `r`, column `c`.
pub fn grid(rows: usize, cols: usize) -> Graph {
    let mut graph = Graph::from_edges(0..rows * cols, []);
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                graph.add_edge(v, v + 1);
            }
            if r + 1 < rows {
                graph.add_edge(v, v + cols);
            }
        }
    }
    graph
}

/// Two rails of `rungs` vertices joined rung by rung.
pub fn ladder(rungs: usize) -> Graph {
    grid(2, rungs)
}

/// Erdős–Rényi graph: every pair is an edge with probability `density`.
pub fn random<R: Rng>(n: usize, density: f64, rng: &mut R) -> Graph {
    let mut graph = Graph::from_edges(0..n, []);
    for u in 0..n {
        for v in u + 1..n {
            if rng.gen::<f64>() < density {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

/// Like [`random`], on top of a random spanning tree so the result is
/// connected whenever `n > 0`.
pub fn random_connected<R: Rng>(n: usize, density: f64, rng: &mut R) -> Graph {
    let mut graph = random(n, density, rng);
    let mut order: Vec<Vertex> = (0..n).collect();
    order.shuffle(rng);
    for idx in 1..order.len() {
        let parent = order[rng.gen_range(0..idx)];
        graph.add_edge(parent, order[idx]);
    }
    graph
}
