//! Extraction of size-k selections from a discovery tree.

use std::collections::HashMap;

use crate::combinatorics::{combinations, fixed_sum_partitions};
use crate::discovery::NodeMap;
use crate::union_product::{refined_union_product, LocalId, Selection};

/// Every selection of `k` tree nodes rooted at `node` that stands for a
/// connected vertex set.
///
/// The remaining `k - 1` slots are spread over `i` children in every possible
/// composition; child results are merged through the refined union product,
/// which also guarantees that no vertex set is produced twice.
pub fn extract(tree: &NodeMap, node: LocalId, k: usize) -> Vec<Selection> {
    Extractor {
        tree,
        memo: HashMap::new(),
    }
    .extract(node, k)
}

/// Memoizes the selections of every `(node, size)` within one extraction.
struct Extractor<'t> {
    tree: &'t NodeMap,
    memo: HashMap<(LocalId, usize), Vec<Selection>>,
}

impl Extractor<'_> {
    fn extract(&mut self, node: LocalId, k: usize) -> Vec<Selection> {
        if let Some(selections) = self.memo.get(&(node, k)) {
            return selections.clone();
        }
        let selections = self.expand(node, k);
        self.memo.insert((node, k), selections.clone());
        selections
    }

    fn expand(&mut self, node: LocalId, k: usize) -> Vec<Selection> {
        match k {
            0 => return Vec::new(),
            1 => return vec![vec![node]],
            _ => {}
        }

        let tree = self.tree;
        let children = &tree[node].children;
        let mut selections = Vec::new();

        for i in 1..=children.len().min(k - 1) {
            for subset in combinations(i, children) {
                for sizes in fixed_sum_partitions(i, k - 1) {
                    // A child without selections of its allotted size sinks the branch.
                    let Some(domains) = subset
                        .iter()
                        .zip(&sizes)
                        .map(|(&child, &size)| {
                            let domain = self.extract(child, size);
                            (!domain.is_empty()).then_some(domain)
                        })
                        .collect::<Option<Vec<_>>>()
                    else {
                        continue;
                    };

                    for merged in refined_union_product(&domains, tree) {
                        let mut selection = Vec::with_capacity(k);
                        selection.push(node);
                        selection.extend(merged);
                        selections.push(selection);
                    }
                }
            }
        }

        selections
    }
}
