use page_graph_core::{centers, scc, AnalysisConfig, Graph};
use proptest::prelude::*;

const UNREACHABLE: u32 = u32::MAX;

/// Vertex count plus an edge list over `0..n`.
fn arb_graph(max_vertices: usize, max_edges: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=max_vertices).prop_flat_map(move |n| {
        (Just(n), prop::collection::vec((0..n, 0..n), 0..=max_edges))
    })
}

fn label(i: usize) -> String {
    format!("https://example.org/page/{i}")
}

/// Register every vertex first so index `i` is `label(i)`.
fn build(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_vertex(&label(i));
    }
    for &(a, b) in edges {
        g.add_edge(&label(a), &label(b));
    }
    g
}

/// All-pairs hop distances by Floyd-Warshall.
fn all_pairs(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<u32>> {
    let mut d = vec![vec![UNREACHABLE; n]; n];
    for (i, row) in d.iter_mut().enumerate() {
        row[i] = 0;
    }
    for &(a, b) in edges {
        if a != b {
            d[a][b] = 1;
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if d[i][k] != UNREACHABLE && d[k][j] != UNREACHABLE && d[i][k] + d[k][j] < d[i][j] {
                    d[i][j] = d[i][k] + d[k][j];
                }
            }
        }
    }
    d
}

fn has_permutation_path(n: usize, edges: &[(usize, usize)]) -> bool {
    fn extend(current: usize, used: &mut Vec<bool>, depth: usize, adj: &[Vec<bool>]) -> bool {
        if depth == used.len() {
            return true;
        }
        for next in 0..used.len() {
            if !used[next] && adj[current][next] {
                used[next] = true;
                if extend(next, used, depth + 1, adj) {
                    return true;
                }
                used[next] = false;
            }
        }
        false
    }

    let mut adj = vec![vec![false; n]; n];
    for &(a, b) in edges {
        adj[a][b] = true;
    }
    (0..n).any(|start| {
        let mut used = vec![false; n];
        used[start] = true;
        extend(start, &mut used, 1, &adj)
    })
}

proptest! {
    #[test]
    fn shortest_path_matches_floyd_warshall((n, edges) in arb_graph(12, 40)) {
        let g = build(n, &edges);
        let d = all_pairs(n, &edges);
        for a in 0..n {
            for b in 0..n {
                let expected = (d[a][b] != UNREACHABLE).then_some(d[a][b]);
                prop_assert_eq!(g.shortest_path(&label(a), &label(b)), expected);
            }
        }
    }

    #[test]
    fn shortest_path_to_self_is_zero((n, edges) in arb_graph(10, 30)) {
        let g = build(n, &edges);
        for a in 0..n {
            prop_assert_eq!(g.shortest_path(&label(a), &label(a)), Some(0));
        }
        prop_assert_eq!(g.shortest_path(&label(0), "unknown"), None);
    }

    #[test]
    fn readding_labels_keeps_indices((n, edges) in arb_graph(10, 30)) {
        let mut g = build(n, &edges);
        let before: Vec<Option<usize>> = (0..n).map(|i| g.index_of(&label(i))).collect();
        for i in (0..n).rev() {
            g.add_vertex(&label(i));
        }
        for &(a, b) in &edges {
            g.add_edge(&label(b), &label(a));
        }
        let after: Vec<Option<usize>> = (0..n).map(|i| g.index_of(&label(i))).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(g.vertex_count(), n);
        for i in 0..n {
            let expected = label(i);
            prop_assert_eq!(g.label_of(i), Some(expected.as_str()));
        }
    }

    #[test]
    fn components_partition_and_are_maximal((n, edges) in arb_graph(12, 40)) {
        let g = build(n, &edges);
        let d = all_pairs(n, &edges);
        let comps = scc::component_indices(&g);

        let mut owner = vec![usize::MAX; n];
        for (c, comp) in comps.iter().enumerate() {
            for &v in comp {
                prop_assert_eq!(owner[v], usize::MAX, "vertex {} in two components", v);
                owner[v] = c;
            }
        }
        prop_assert!(owner.iter().all(|&c| c != usize::MAX));

        for a in 0..n {
            for b in 0..n {
                let mutual = d[a][b] != UNREACHABLE && d[b][a] != UNREACHABLE;
                prop_assert_eq!(owner[a] == owner[b], mutual);
            }
        }

        let labelled = g.strongly_connected_components();
        prop_assert_eq!(labelled.len(), comps.len());
    }

    #[test]
    fn centers_have_minimum_eccentricity((n, edges) in arb_graph(10, 30)) {
        let g = build(n, &edges);
        let d = all_pairs(n, &edges);
        let ecc: Vec<u32> = d
            .iter()
            .map(|row| row.iter().copied().filter(|&x| x != UNREACHABLE).max().unwrap_or(0))
            .collect();
        prop_assert_eq!(centers::eccentricities(&g), ecc.clone());

        let min = ecc.iter().copied().min().unwrap_or(0);
        let expected: Vec<String> = (0..n).filter(|&v| ecc[v] == min).map(label).collect();
        prop_assert_eq!(g.centers(), expected);
    }

    #[test]
    fn hamiltonian_path_is_valid_or_absent((n, edges) in arb_graph(7, 20)) {
        let g = build(n, &edges);
        let config = AnalysisConfig::default();
        match g.hamiltonian_path_with(&config).unwrap() {
            Some(path) => {
                prop_assert_eq!(path.len(), n);
                let mut seen: Vec<usize> = path.iter().map(|l| g.index_of(l).unwrap()).collect();
                for pair in seen.windows(2) {
                    prop_assert!(g.contains_edge(pair[0], pair[1]));
                }
                seen.sort_unstable();
                prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
            }
            None => prop_assert!(!has_permutation_path(n, &edges)),
        }
    }
}
