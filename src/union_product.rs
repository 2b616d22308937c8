//! Refined union product: merges per-subtree selections into one selection.
//!
//! Given domains `D_1..D_n`, accepts every tuple `(x_1, .., x_n)` such that
//! for each pair `i < j`:
//!
//! - `x_i` and `x_j` stand for disjoint graph vertices, and
//! - `x_j` contains a first-seen node, or no child of a node in `x_i` stands
//!   for a vertex of `x_j`.
//!
//! The second condition keeps a later branch from re-assembling a vertex set
//! that an earlier branch already reaches through its own children.

/// Index of a node inside one discovery tree.
pub type LocalId = usize;

/// A sequence of tree nodes forming one partial or complete combination.
pub type Selection = Vec<LocalId>;

/// The predicates the union product is refined by.
pub trait SelectionConstraints {
    /// No graph vertex occurs in both selections.
    fn vertex_disjoint(&self, a: &[LocalId], b: &[LocalId]) -> bool;

    /// Some node of the selection was the first discovery of its vertex.
    fn has_new_mark(&self, selection: &[LocalId]) -> bool;

    /// No child of a node in `a` stands for a vertex occurring in `b`.
    fn no_children_of(&self, a: &[LocalId], b: &[LocalId]) -> bool;

    /// Whether `later` may follow `earlier` in one accepted tuple.
    fn compatible(&self, earlier: &[LocalId], later: &[LocalId]) -> bool {
        self.vertex_disjoint(earlier, later)
            && (self.has_new_mark(later) || self.no_children_of(earlier, later))
    }
}

/// Every accepted tuple over `domains`, each flattened into one selection in
/// domain order.
///
/// Any empty domain empties the product. A single domain is passed through
/// unchanged since there is no pair to constrain.
pub fn refined_union_product<C>(domains: &[Vec<Selection>], constraints: &C) -> Vec<Selection>
where
    C: SelectionConstraints + ?Sized,
{
    if domains.is_empty() || domains.iter().any(Vec::is_empty) {
        return Vec::new();
    }
    if let [only] = domains {
        return only.clone();
    }

    let mut results = Vec::new();
    let mut chosen = Vec::with_capacity(domains.len());
    backtrack(0, domains, constraints, &mut chosen, &mut results);
    results
}

/// Recursive backtracking over the domains, checking each new choice against
/// all earlier ones
fn backtrack<'d, C>(
    depth: usize,
    domains: &'d [Vec<Selection>],
    constraints: &C,
    chosen: &mut Vec<&'d Selection>,
    results: &mut Vec<Selection>,
) where
    C: SelectionConstraints + ?Sized,
{
    if depth == domains.len() {
        results.push(chosen.iter().flat_map(|s| s.iter().copied()).collect());
        return;
    }

    for candidate in &domains[depth] {
        if chosen
            .iter()
            .all(|earlier| constraints.compatible(earlier, candidate))
        {
            chosen.push(candidate);
            backtrack(depth + 1, domains, constraints, chosen, results);
            chosen.pop();
        }
    }
}
