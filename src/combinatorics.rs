use itertools::Itertools;

/// Calculate number of combinations C(n, k) without overflow
pub fn num_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    if k == 0 || k == n {
        return 1;
    }

    let k = k.min(n - k); // C(n,k) = C(n,n-k)
    let mut result = 1usize;

    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }

    result
}

/// Every `i`-element subset of `items`, each kept in source order, subsets in
/// lexicographic order of their source indices.
///
/// Asking for more elements than available yields no subsets; `i == 0` yields
/// the single empty subset.
pub fn combinations<T: Clone>(i: usize, items: &[T]) -> Vec<Vec<T>> {
    if i > items.len() {
        return Vec::new();
    }
    items.iter().cloned().combinations(i).collect()
}

/// Every way of writing `total` as an ordered sum of exactly `i` positive
/// parts. `(1, 2)` and `(2, 1)` are distinct results.
///
/// Yields nothing when `i == 0` or `total < i`.
pub fn fixed_sum_partitions(i: usize, total: usize) -> Vec<Vec<usize>> {
    if i == 0 || total < i {
        return Vec::new();
    }
    let mut partitions = Vec::with_capacity(num_combinations(total - 1, i - 1));
    let mut current = Vec::with_capacity(i);
    compose(i, total, &mut current, &mut partitions);
    partitions
}

fn compose(parts: usize, remaining: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if parts == 1 {
        current.push(remaining);
        out.push(current.clone());
        current.pop();
        return;
    }
    // Leave at least one unit for each of the parts still to come.
    for first in 1..=remaining - (parts - 1) {
        current.push(first);
        compose(parts - 1, remaining - first, current, out);
        current.pop();
    }
}
