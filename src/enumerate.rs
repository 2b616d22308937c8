//! Exactly-once enumeration of connected induced subgraphs.
//!
//! Roots are processed in ascending vertex order. After a root is done it is
//! removed from the working graph, so every vertex set is found exactly once:
//! from the discovery tree of its smallest member.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::discovery::{self, NodeMap};
use crate::error::{Result, SubarchError};
use crate::extract::extract;
use crate::progress::{Progress, Stage};
use crate::{Config, Graph, Vertex};

/// Rejects sizes outside `1..=|V(graph)|`.
pub fn check_size(graph: &Graph, k: usize) -> Result<()> {
    let vertices = graph.num_vertices();
    if k == 0 || k > vertices {
        return Err(SubarchError::InvalidSize { k, vertices });
    }
    Ok(())
}

/// Vertex sets of all connected induced `k`-vertex subgraphs, each set once.
/// Each set lists its smallest vertex first.
pub fn connected_vertex_sets(graph: &Graph, k: usize) -> Result<Vec<Vec<Vertex>>> {
    check_size(graph, k)?;

    let mut working = graph.clone();
    let mut sets = Vec::new();
    for root in graph.vertices() {
        let tree = discovery::build(root, &working, k);
        let selections = extract(&tree, NodeMap::ROOT, k);
        trace!(
            root,
            tree_nodes = tree.len(),
            found = selections.len(),
            "root expanded"
        );
        sets.extend(selections.iter().map(|s| tree.resolve(s)));
        working.remove_vertex(root);
    }

    debug!(k, sets = sets.len(), "connected vertex sets enumerated");
    Ok(sets)
}

/// The connected induced `k`-vertex subgraphs of `graph`, in enumeration order.
pub fn connected_subgraphs(
    graph: &Graph,
    k: usize,
    config: &Config,
    progress: &dyn Progress,
) -> Result<Vec<Graph>> {
    let sets = connected_vertex_sets(graph, k)?;

    progress.start(Stage::ConnectedSubgraphs, sets.len());
    let materialize = |set: &Vec<Vertex>| {
        let subgraph = graph.induced(set);
        progress.advance(Stage::ConnectedSubgraphs, 1);
        subgraph
    };
    let subgraphs: Vec<Graph> = if config.parallel {
        sets.par_iter().map(materialize).collect()
    } else {
        sets.iter().map(materialize).collect()
    };
    progress.finish(Stage::ConnectedSubgraphs, subgraphs.len());

    Ok(subgraphs)
}
