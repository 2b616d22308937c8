//! Rooted discovery trees over a working graph.
//!
//! A tree is an arena of [`TreeNode`]s indexed by [`LocalId`]; children refer
//! to each other by index. One vertex may occur at several nodes. The first
//! node created for a vertex carries [`Mark::New`], later ones [`Mark::Seen`].

use std::collections::HashSet;
use std::ops::Index;

use crate::union_product::{LocalId, SelectionConstraints};
use crate::{Graph, Vertex};

/// Provenance of a tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mark {
    /// The root, which is fixed rather than discovered.
    #[default]
    None,
    /// First discovery of the vertex in this tree.
    New,
    /// The vertex was already discovered by another branch.
    Seen,
}

/// One occurrence of a vertex in a discovery tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub vertex: Vertex,
    pub local_id: LocalId,
    pub children: Vec<LocalId>,
    pub mark: Mark,
}

/// Arena owning every node of one discovery tree. The root is node 0.
#[derive(Debug, Clone)]
pub struct NodeMap {
    nodes: Vec<TreeNode>,
}

impl NodeMap {
    pub const ROOT: LocalId = 0;

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Maps a selection of tree nodes back to graph vertices.
    pub fn resolve(&self, selection: &[LocalId]) -> Vec<Vertex> {
        selection.iter().map(|&id| self.nodes[id].vertex).collect()
    }

    fn vertices<'a>(&'a self, selection: &'a [LocalId]) -> impl Iterator<Item = Vertex> + 'a {
        selection.iter().map(|&id| self.nodes[id].vertex)
    }
}

impl Index<LocalId> for NodeMap {
    type Output = TreeNode;

    fn index(&self, id: LocalId) -> &TreeNode {
        &self.nodes[id]
    }
}

impl SelectionConstraints for NodeMap {
    fn vertex_disjoint(&self, a: &[LocalId], b: &[LocalId]) -> bool {
        let taken: Vec<Vertex> = self.vertices(a).collect();
        self.vertices(b).all(|v| !taken.contains(&v))
    }

    fn has_new_mark(&self, selection: &[LocalId]) -> bool {
        selection.iter().any(|&id| self.nodes[id].mark == Mark::New)
    }

    fn no_children_of(&self, a: &[LocalId], b: &[LocalId]) -> bool {
        let reachable: Vec<Vertex> = a
            .iter()
            .flat_map(|&id| self.vertices(&self.nodes[id].children))
            .collect();
        self.vertices(b).all(|v| !reachable.contains(&v))
    }
}

/// Builds the discovery tree of `root` in `graph`, expanding up to
/// `depth_bound` levels below the root.
pub fn build(root: Vertex, graph: &Graph, depth_bound: usize) -> NodeMap {
    TreeBuilder::new(graph, depth_bound).build(root)
}

/// State of a single tree build. Each build owns its marks, so no state leaks
/// from one root to the next.
pub struct TreeBuilder<'g> {
    graph: &'g Graph,
    depth_bound: usize,
    nodes: Vec<TreeNode>,
    /// `ancestry[d]`: vertices blocked for children created at depth `d`,
    /// i.e. the ancestors plus the siblings created so far at each level.
    ancestry: Vec<Vec<Vertex>>,
    discovered: HashSet<Vertex>,
}

impl<'g> TreeBuilder<'g> {
    pub fn new(graph: &'g Graph, depth_bound: usize) -> Self {
        Self {
            graph,
            depth_bound,
            nodes: Vec::new(),
            ancestry: vec![Vec::new(); depth_bound + 1],
            discovered: HashSet::new(),
        }
    }

    pub fn build(mut self, root: Vertex) -> NodeMap {
        self.nodes.push(TreeNode {
            vertex: root,
            local_id: NodeMap::ROOT,
            children: Vec::new(),
            mark: Mark::None,
        });
        self.ancestry[0].push(root);
        if self.depth_bound >= 1 {
            self.expand(NodeMap::ROOT, 1);
        }
        NodeMap { nodes: self.nodes }
    }

    fn expand(&mut self, node: LocalId, depth: usize) {
        self.ancestry[depth] = self.ancestry[depth - 1].clone();
        let graph = self.graph;
        let vertex = self.nodes[node].vertex;

        for neighbor in graph.neighbors(vertex) {
            if self.ancestry[depth].contains(&neighbor) {
                continue;
            }

            let child = self.nodes.len();
            let mark = if self.discovered.insert(neighbor) {
                Mark::New
            } else {
                Mark::Seen
            };
            self.nodes.push(TreeNode {
                vertex: neighbor,
                local_id: child,
                children: Vec::new(),
                mark,
            });
            self.nodes[node].children.push(child);
            self.ancestry[depth].push(neighbor);

            if depth < self.depth_bound {
                self.expand(child, depth + 1);
            }
        }
    }
}
