use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::Bound;

use tracing::debug;

/// Vertex identifier. Identifiers of a graph need not be contiguous.
pub type Vertex = usize;

/// Represents an undirected simple graph with an ordered adjacency map
///
/// Vertices iterate in ascending identifier order, and so do the neighbors of
/// every vertex. The enumeration relies on this for its global vertex order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adj: BTreeMap<Vertex, BTreeSet<Vertex>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            adj: BTreeMap::new(),
        }
    }

    /// Builds a graph from a vertex list and an edge list. Edge endpoints are
    /// added as vertices when missing.
    pub fn from_edges<V, E>(vertices: V, edges: E) -> Self
    where
        V: IntoIterator<Item = Vertex>,
        E: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Graph::new();
        for v in vertices {
            graph.add_vertex(v);
        }
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    pub fn add_vertex(&mut self, v: Vertex) {
        self.adj.entry(v).or_default();
    }

    /// Adds the undirected edge `{u, v}`. Self-loops are ignored.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) {
        if u == v {
            self.add_vertex(u);
            return;
        }
        self.adj.entry(u).or_default().insert(v);
        self.adj.entry(v).or_default().insert(u);
    }

    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        let removed = self.adj.get_mut(&u).is_some_and(|n| n.remove(&v));
        if let Some(n) = self.adj.get_mut(&v) {
            n.remove(&u);
        }
        removed
    }

    /// Removes `v` together with its incident edges.
    pub fn remove_vertex(&mut self, v: Vertex) -> bool {
        let Some(neighbors) = self.adj.remove(&v) else {
            return false;
        };
        for w in neighbors {
            if let Some(n) = self.adj.get_mut(&w) {
                n.remove(&v);
            }
        }
        true
    }

    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.adj.contains_key(&v)
    }

    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.adj.get(&u).is_some_and(|n| n.contains(&v))
    }

    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.adj.get(&v).into_iter().flatten().copied()
    }

    pub fn degree(&self, v: Vertex) -> usize {
        self.adj.get(&v).map_or(0, BTreeSet::len)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.adj.keys().copied()
    }

    /// Every undirected edge exactly once, as `(smaller, larger)`.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.adj
            .iter()
            .flat_map(|(&u, n)| {
                n.range((Bound::Excluded(u), Bound::Unbounded))
                    .map(move |&v| (u, v))
            })
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Whether every vertex reaches every other one. The empty graph is not
    /// considered connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.vertices().next() else {
            return false;
        };
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for w in self.neighbors(v) {
                if seen.insert(w) {
                    queue.push_back(w);
                }
            }
        }
        seen.len() == self.num_vertices()
    }

    /// The subgraph induced by `vertices`: those vertices and every edge of
    /// `self` with both endpoints among them. Unknown vertices are skipped.
    pub fn induced(&self, vertices: &[Vertex]) -> Graph {
        let keep: BTreeSet<Vertex> = vertices
            .iter()
            .copied()
            .filter(|v| self.contains_vertex(*v))
            .collect();
        let adj = keep
            .iter()
            .map(|&v| {
                let n = self.neighbors(v).filter(|w| keep.contains(w)).collect();
                (v, n)
            })
            .collect();
        Graph { adj }
    }

    /// Relabels the vertices to `0..n`, preserving their relative order.
    pub fn normalized(&self) -> Graph {
        let relabel: BTreeMap<Vertex, Vertex> = self
            .vertices()
            .enumerate()
            .map(|(idx, v)| (v, idx))
            .collect();
        Graph::from_edges(
            relabel.values().copied(),
            self.edges().map(|(u, v)| (relabel[&u], relabel[&v])),
        )
    }

    /// Edge list of the normalized graph, the form external mappers consume.
    pub fn edge_view(&self) -> Vec<(Vertex, Vertex)> {
        self.normalized().edges().collect()
    }
}

pub mod canonical;
pub mod combinatorics;
pub mod config;
pub mod discovery;
pub mod enumerate;
pub mod error;
pub mod extract;
pub mod generators;
pub mod mapping;
pub mod optimal;
pub mod parser;
pub mod progress;
pub mod reduction;
pub mod union_product;

pub use config::{CollisionCheck, Config};
pub use error::{Result, SubarchError};
pub use progress::{NoProgress, Progress, Stage, TracingProgress};

use canonical::Deduplicator;

/// All connected induced subgraphs of `graph` with exactly `k` vertices, each
/// vertex set exactly once.
pub fn enumerate_connected_subgraphs(graph: &Graph, k: usize) -> Result<Vec<Graph>> {
    enumerate::connected_subgraphs(graph, k, &Config::default(), &NoProgress)
}

/// Number of connected induced `k`-vertex subgraphs of `graph`.
pub fn count_connected_subgraphs(graph: &Graph, k: usize) -> Result<usize> {
    Ok(enumerate::connected_vertex_sets(graph, k)?.len())
}

/// Keeps the first subgraph of every isomorphism class, using the default
/// configuration.
pub fn deduplicate(subgraphs: Vec<Graph>) -> Vec<Graph> {
    canonical::deduplicate_with(subgraphs, &Config::default(), &NoProgress)
}

/// The optimal `k`-vertex sub-architectures of `graph`: connected, pairwise
/// non-isomorphic, and none embeds into another.
pub fn optimal_subarchitectures(graph: &Graph, k: usize) -> Result<Vec<Graph>> {
    optimal_subarchitectures_with(graph, k, &Config::default(), &NoProgress)
}

pub fn optimal_subarchitectures_with(
    graph: &Graph,
    k: usize,
    config: &Config,
    progress: &dyn Progress,
) -> Result<Vec<Graph>> {
    let subgraphs = enumerate::connected_subgraphs(graph, k, config, progress)?;
    let candidates = canonical::deduplicate_with(subgraphs, config, progress);
    let optimal = optimal::select_optimal(candidates, config, progress);
    debug!(k, optimal = optimal.len(), "optimal sub-architectures selected");
    Ok(optimal)
}

/// Every connected `k`-vertex subgraph of `graph` up to isomorphism, including
/// those that drop edges of the induced subgraph.
pub fn non_isomorphic_subgraphs(
    graph: &Graph,
    k: usize,
    config: &Config,
    progress: &dyn Progress,
) -> Result<Vec<Graph>> {
    let induced = enumerate::connected_subgraphs(graph, k, config, progress)?;
    // Isomorphic induced subgraphs have isomorphic reductions.
    let induced = canonical::deduplicate_with(induced, config, progress);

    progress.start(Stage::EdgeReduction, induced.len());
    let mut classes = Deduplicator::new(config);
    for subgraph in &induced {
        classes.extend(reduction::edge_reductions(subgraph));
        progress.advance(Stage::EdgeReduction, 1);
    }
    progress.finish(Stage::EdgeReduction, classes.len());

    debug!(
        k,
        classes = classes.len(),
        collisions = classes.collisions(),
        "non-isomorphic subgraphs collected"
    );
    Ok(classes.into_representatives())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_cycle() -> Graph {
        Graph::from_edges(0..4, [(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    #[test]
    fn test_graph_creation() {
        let g = four_cycle();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_edges(), 4);
        assert!(g.has_edge(3, 0));
        assert!(!g.has_edge(0, 2));
        assert_eq!(g.edges().collect::<Vec<_>>(), [(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_self_loops_ignored() {
        let mut g = Graph::new();
        g.add_edge(7, 7);
        assert_eq!(g.num_vertices(), 1);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_remove_vertex() {
        let mut g = four_cycle();
        assert!(g.remove_vertex(1));
        assert!(!g.remove_vertex(1));
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), [3]);
        assert!(g.is_connected());
        g.remove_vertex(3);
        assert!(!g.is_connected());
    }

    #[test]
    fn test_connectivity_edge_cases() {
        assert!(!Graph::new().is_connected());
        assert!(Graph::from_edges([5], []).is_connected());
    }

    #[test]
    fn test_induced_subgraph() {
        let g = Graph::from_edges(0..4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let h = g.induced(&[0, 2, 3, 9]);
        assert_eq!(h.vertices().collect::<Vec<_>>(), [0, 2, 3]);
        assert_eq!(h.edges().collect::<Vec<_>>(), [(0, 2), (0, 3), (2, 3)]);
    }

    #[test]
    fn test_largest_identifier_edges_listed_once() {
        let g = Graph::from_edges([0, usize::MAX], [(usize::MAX, 0)]);
        assert_eq!(g.edges().collect::<Vec<_>>(), [(0, usize::MAX)]);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.edge_view(), [(0, 1)]);
    }

    #[test]
    fn test_edge_view_relabels() {
        let g = Graph::from_edges([10, 20, 30], [(30, 10), (10, 20)]);
        assert_eq!(g.edge_view(), [(0, 1), (0, 2)]);
        assert_eq!(g.normalized().vertices().collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn test_four_cycle_pipeline() {
        let g = four_cycle();
        let subgraphs = enumerate_connected_subgraphs(&g, 3).unwrap();
        assert_eq!(subgraphs.len(), 4);
        assert_eq!(deduplicate(subgraphs).len(), 1);

        let optimal = optimal_subarchitectures(&g, 3).unwrap();
        assert_eq!(optimal.len(), 1);
        assert_eq!(optimal[0].num_vertices(), 3);
        assert_eq!(optimal[0].num_edges(), 2);
    }

    #[test]
    fn test_invalid_size() {
        let g = four_cycle();
        assert!(matches!(
            optimal_subarchitectures(&g, 0),
            Err(SubarchError::InvalidSize { k: 0, vertices: 4 })
        ));
        assert!(matches!(
            count_connected_subgraphs(&g, 5),
            Err(SubarchError::InvalidSize { k: 5, vertices: 4 })
        ));
    }

    #[test]
    fn test_non_isomorphic_subgraphs_include_reductions() {
        // Triangle: induced class is the triangle, reductions add the path.
        let g = Graph::from_edges(0..3, [(0, 1), (1, 2), (0, 2)]);
        let classes = non_isomorphic_subgraphs(&g, 3, &Config::default(), &NoProgress).unwrap();
        let mut edge_counts: Vec<usize> = classes.iter().map(Graph::num_edges).collect();
        edge_counts.sort_unstable();
        assert_eq!(edge_counts, [2, 3]);
    }
}
