mod common;

use common::*;
use optimal_subarchitectures::combinatorics::num_combinations;
use optimal_subarchitectures::enumerate::connected_vertex_sets;
use optimal_subarchitectures::{
    count_connected_subgraphs, enumerate_connected_subgraphs, generators, Graph, SubarchError,
};
use rstest::rstest;

fn assert_matches_brute_force(graph: &Graph, k: usize) {
    let sets = connected_vertex_sets(graph, k).unwrap();
    let found = sets.len();
    let unique = as_sets(sets);
    assert_eq!(found, unique.len(), "duplicate vertex set for k={k} in {graph:?}");
    assert_eq!(unique, brute_force_connected_sets(graph, k), "k={k} in {graph:?}");
}

#[rstest]
fn test_complete_graphs(#[values(1, 2, 3, 4, 5, 6, 7)] n: usize) {
    init_test_logger();
    let g = generators::complete(n);
    for k in 1..=n {
        assert_eq!(count_connected_subgraphs(&g, k).unwrap(), num_combinations(n, k));
    }
}

#[rstest]
#[case::path(generators::path(6), 3, 4)]
#[case::cycle(generators::cycle(4), 3, 4)]
#[case::star(generators::star(4), 2, 4)]
#[case::star_triples(generators::star(4), 3, 6)]
#[case::bowtie(bowtie(), 3, 6)]
#[case::whole_grid(generators::grid(2, 3), 6, 1)]
fn test_known_counts(#[case] graph: Graph, #[case] k: usize, #[case] expected: usize) {
    init_test_logger();
    assert_eq!(count_connected_subgraphs(&graph, k).unwrap(), expected);
    assert_matches_brute_force(&graph, k);
}

#[test]
fn test_random_graphs_match_brute_force() {
    init_test_logger();
    for seed in 0..200 {
        let g = random_graph(seed, 8);
        for k in 1..=g.num_vertices() {
            assert_matches_brute_force(&g, k);
        }
    }
}

#[test]
fn test_sparse_labels_match_brute_force() {
    for seed in 0..50 {
        let dense = random_graph(1_000 + seed, 7);
        let relabel = |v: usize| 3 + 7 * (dense.num_vertices() - v);
        let sparse = Graph::from_edges(
            dense.vertices().map(relabel),
            dense.edges().map(|(u, v)| (relabel(u), relabel(v))),
        );
        for k in 1..=sparse.num_vertices() {
            assert_eq!(
                count_connected_subgraphs(&sparse, k).unwrap(),
                count_connected_subgraphs(&dense, k).unwrap()
            );
            assert_matches_brute_force(&sparse, k);
        }
    }
}

#[test]
fn test_disconnected_topology() {
    // Two triangles far apart: no connected set spans both.
    let g = Graph::from_edges(0..6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    assert_eq!(count_connected_subgraphs(&g, 3).unwrap(), 2);
    assert_eq!(count_connected_subgraphs(&g, 4).unwrap(), 0);
    assert!(enumerate_connected_subgraphs(&g, 5).unwrap().is_empty());
}

#[test]
fn test_subgraphs_are_induced() {
    let g = generators::grid(3, 3);
    for subgraph in enumerate_connected_subgraphs(&g, 4).unwrap() {
        assert!(subgraph.is_connected());
        let vertices: Vec<_> = subgraph.vertices().collect();
        assert_eq!(subgraph, g.induced(&vertices));
    }
}

#[test]
fn test_invalid_sizes() {
    let g = generators::path(3);
    assert!(matches!(
        connected_vertex_sets(&g, 0),
        Err(SubarchError::InvalidSize { k: 0, vertices: 3 })
    ));
    assert!(matches!(
        enumerate_connected_subgraphs(&g, 4),
        Err(SubarchError::InvalidSize { k: 4, vertices: 3 })
    ));
    assert!(matches!(
        count_connected_subgraphs(&Graph::new(), 1),
        Err(SubarchError::InvalidSize { k: 1, vertices: 0 })
    ));
}

mod property_tests {
    use super::*;
    use quickcheck::{quickcheck, Arbitrary, Gen};

    #[derive(Clone, Debug)]
    struct SmallGraph(Graph);

    impl Arbitrary for SmallGraph {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 8 + 1;
            let mut graph = Graph::from_edges(0..n, []);
            for u in 0..n {
                for v in u + 1..n {
                    if bool::arbitrary(g) {
                        graph.add_edge(u, v);
                    }
                }
            }
            Self(graph)
        }
    }

    quickcheck! {
        fn prop_every_connected_set_exactly_once(graph: SmallGraph) -> bool {
            let graph = graph.0;
            (1..=graph.num_vertices()).all(|k| {
                let sets = connected_vertex_sets(&graph, k).unwrap();
                let found = sets.len();
                let unique = as_sets(sets);
                found == unique.len() && unique == brute_force_connected_sets(&graph, k)
            })
        }

        fn prop_smallest_vertex_first(graph: SmallGraph) -> bool {
            let graph = graph.0;
            (1..=graph.num_vertices()).all(|k| {
                connected_vertex_sets(&graph, k)
                    .unwrap()
                    .iter()
                    .all(|set| set.iter().min() == set.first())
            })
        }
    }
}
