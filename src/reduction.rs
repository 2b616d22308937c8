//! Connected edge reductions: spanning subgraphs that stay connected.

use std::collections::{HashSet, VecDeque};

use crate::{Graph, Vertex};

/// Every connected graph obtained from `graph` by deleting edges while keeping
/// all vertices, `graph` itself first. Each edge set occurs once.
///
/// A disconnected input has no reductions besides itself.
pub fn edge_reductions(graph: &Graph) -> Vec<Graph> {
    let key = |g: &Graph| -> Vec<(Vertex, Vertex)> { g.edges().collect() };

    let mut seen: HashSet<Vec<(Vertex, Vertex)>> = HashSet::from([key(graph)]);
    let mut reductions = vec![graph.clone()];
    let mut queue = VecDeque::from([graph.clone()]);

    while let Some(current) = queue.pop_front() {
        for (u, v) in current.edges() {
            let mut reduced = current.clone();
            reduced.remove_edge(u, v);
            if !reduced.is_connected() || !seen.insert(key(&reduced)) {
                continue;
            }
            reductions.push(reduced.clone());
            queue.push_back(reduced);
        }
    }

    reductions
}
