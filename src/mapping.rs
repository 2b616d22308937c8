use std::collections::BTreeMap;

use crate::{Graph, Vertex};

/// Represents an injective, edge-preserving mapping from pattern vertices to
/// host vertices
pub type Mapping = BTreeMap<Vertex, Vertex>;

/// Index-based view of a graph: vertex `i` is the `i`-th smallest identifier
struct Dense {
    vertices: Vec<Vertex>,
    /// Adjacency matrix: adj[i][j] = whether vertices i and j are adjacent
    adj: Vec<Vec<bool>>,
    neighbors: Vec<Vec<usize>>,
}

impl Dense {
    fn new(graph: &Graph) -> Self {
        let vertices: Vec<Vertex> = graph.vertices().collect();
        let n = vertices.len();
        let mut adj = vec![vec![false; n]; n];
        let mut neighbors = vec![Vec::new(); n];
        for (i, &v) in vertices.iter().enumerate() {
            for w in graph.neighbors(v) {
                if let Ok(j) = vertices.binary_search(&w) {
                    adj[i][j] = true;
                    neighbors[i].push(j);
                }
            }
        }
        Dense {
            vertices,
            adj,
            neighbors,
        }
    }

    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn degree(&self, i: usize) -> usize {
        self.neighbors[i].len()
    }

    fn degrees_descending(&self) -> Vec<usize> {
        let mut degrees: Vec<usize> = (0..self.num_vertices()).map(|i| self.degree(i)).collect();
        degrees.sort_unstable_by(|a, b| b.cmp(a));
        degrees
    }

    /// Assignment order keeping each vertex adjacent to an earlier one where
    /// possible: start from the highest degree, then repeatedly take the
    /// vertex with most already-ordered neighbors.
    fn connectivity_order(&self) -> Vec<usize> {
        let n = self.num_vertices();
        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        let mut links = vec![0usize; n];

        while order.len() < n {
            let next = (0..n)
                .filter(|&i| !placed[i])
                .max_by_key(|&i| (links[i], self.degree(i), std::cmp::Reverse(i)));
            let Some(next) = next else { break };
            placed[next] = true;
            order.push(next);
            for &j in &self.neighbors[next] {
                links[j] += 1;
            }
        }
        order
    }
}

/// Whether `pattern` embeds into `target` as a (not necessarily induced)
/// subgraph: an injective vertex map under which every pattern edge is a
/// target edge.
pub fn is_subgraph_monomorphic(pattern: &Graph, target: &Graph) -> bool {
    find_monomorphism(pattern, target).is_some()
}

/// Whether `a` and `b` are isomorphic.
pub fn is_isomorphic(a: &Graph, b: &Graph) -> bool {
    // With equal vertex and edge counts, an embedding maps edges onto edges.
    a.num_vertices() == b.num_vertices()
        && a.num_edges() == b.num_edges()
        && is_subgraph_monomorphic(a, b)
}

/// Find one embedding of `pattern` into `target`, if any
pub fn find_monomorphism(pattern: &Graph, target: &Graph) -> Option<Mapping> {
    if pattern.num_vertices() > target.num_vertices() || pattern.num_edges() > target.num_edges() {
        return None; // No valid mappings possible
    }

    let p = Dense::new(pattern);
    let t = Dense::new(target);

    // The k-th largest pattern degree needs a host vertex of at least that degree.
    let feasible = p
        .degrees_descending()
        .iter()
        .zip(t.degrees_descending())
        .all(|(&need, have)| need <= have);
    if !feasible {
        return None;
    }

    let mut matcher = Matcher {
        order: p.connectivity_order(),
        pattern: &p,
        target: &t,
        assignment: vec![None; p.num_vertices()],
        used: vec![false; t.num_vertices()],
    };
    if !matcher.backtrack(0) {
        return None;
    }

    let mapping = matcher
        .assignment
        .iter()
        .enumerate()
        .filter_map(|(i, image)| image.map(|j| (p.vertices[i], t.vertices[j])))
        .collect();
    Some(mapping)
}

struct Matcher<'a> {
    pattern: &'a Dense,
    target: &'a Dense,
    order: Vec<usize>,
    assignment: Vec<Option<usize>>,
    used: Vec<bool>,
}

impl Matcher<'_> {
    /// Recursive backtracking over the assignment order
    fn backtrack(&mut self, depth: usize) -> bool {
        if depth == self.order.len() {
            return true;
        }

        let (pattern, target) = (self.pattern, self.target);
        let u = self.order[depth];

        // An already mapped neighbor restricts the images to its host neighbors.
        let anchor = pattern.neighbors[u].iter().find_map(|&w| self.assignment[w]);
        let candidates: Vec<usize> = match anchor {
            Some(image) => target.neighbors[image].clone(),
            None => (0..target.num_vertices()).collect(),
        };

        for v in candidates {
            if self.used[v] || target.degree(v) < pattern.degree(u) {
                continue;
            }
            let consistent = pattern.neighbors[u]
                .iter()
                .all(|&w| self.assignment[w].map_or(true, |image| target.adj[v][image]));
            if !consistent {
                continue;
            }

            self.assignment[u] = Some(v);
            self.used[v] = true;
            if self.backtrack(depth + 1) {
                return true;
            }
            self.assignment[u] = None;
            self.used[v] = false;
        }

        false
    }
}
