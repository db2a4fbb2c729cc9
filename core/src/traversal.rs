use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::graph::Graph;
use crate::registry::VertexId;

/// Single-source BFS distances over the forward graph.
///
/// Entry `v` is `Some(hops)` for every vertex reachable from `start` and
/// `None` otherwise. `start` itself is `Some(0)`. Each vertex is enqueued at
/// most once, at its minimum distance.
pub fn bfs_distances(graph: &Graph, start: VertexId) -> Vec<Option<u32>> {
    let mut distances: Vec<Option<u32>> = vec![None; graph.vertex_count()];
    if start >= distances.len() {
        return distances;
    }

    let mut queue: VecDeque<VertexId> = VecDeque::new();
    distances[start] = Some(0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let next = distances[current].map_or(0, |d| d + 1);
        for &neighbor in graph.neighbors_out(current) {
            if distances[neighbor].is_none() {
                distances[neighbor] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// Length in edges of a shortest directed path from `from` to `to`.
///
/// Returns None if either label is unknown or `to` is unreachable.
#[instrument(skip(graph))]
pub fn shortest_path(graph: &Graph, from: &str, to: &str) -> Option<u32> {
    let start = graph.index_of(from)?;
    let target = graph.index_of(to)?;

    let hops = bfs_distances(graph, start)[target];
    debug!(?hops, "shortest path computed");
    hops
}

/// Labels along one shortest directed path, both endpoints included.
///
/// Stores parent pointers during BFS and walks them back once the target is
/// reached. Returns None under the same conditions as [`shortest_path`].
#[instrument(skip(graph))]
pub fn shortest_route(graph: &Graph, from: &str, to: &str) -> Option<Vec<String>> {
    let start = graph.index_of(from)?;
    let target = graph.index_of(to)?;

    if start == target {
        return Some(graph.labels_for(&[start]));
    }

    // Start's parent is itself.
    let mut parent: Vec<Option<VertexId>> = vec![None; graph.vertex_count()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    parent[start] = Some(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &neighbor in graph.neighbors_out(current) {
            if parent[neighbor].is_some() {
                continue;
            }
            parent[neighbor] = Some(current);
            if neighbor == target {
                let route = reconstruct_route(&parent, start, target);
                debug!(hops = route.len() - 1, "shortest route found");
                return Some(graph.labels_for(&route));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

fn reconstruct_route(parent: &[Option<VertexId>], start: VertexId, target: VertexId) -> Vec<VertexId> {
    let mut route = vec![target];
    let mut current = target;
    while current != start {
        match parent[current] {
            Some(p) => current = p,
            None => break,
        }
        route.push(current);
    }
    route.reverse();
    route
}

/// Iterative depth-first traversal from `start` over `adjacency`.
///
/// Visits exactly the vertices a recursive DFS would, in the same order:
/// `on_enter` fires when a vertex is first marked (pre-order) and
/// `on_finish` once all of its descendants are done (post-order). Vertices
/// already set in `visited` are skipped, and `visited` is left marked for
/// every vertex reached so callers can chain traversals.
///
/// Each stack frame holds a vertex and the position of the next neighbor to
/// examine, so long chains cost heap, not call stack.
pub fn depth_first<E, F>(
    adjacency: &[Vec<VertexId>],
    start: VertexId,
    visited: &mut [bool],
    mut on_enter: E,
    mut on_finish: F,
) where
    E: FnMut(VertexId),
    F: FnMut(VertexId),
{
    if visited[start] {
        return;
    }

    visited[start] = true;
    on_enter(start);
    let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (vertex, cursor) = *frame;
        match adjacency[vertex].get(cursor) {
            Some(&next) => {
                frame.1 += 1;
                if !visited[next] {
                    visited[next] = true;
                    on_enter(next);
                    stack.push((next, 0));
                }
            }
            None => {
                stack.pop();
                on_finish(vertex);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chain(n: usize) -> Graph {
        (0..n - 1)
            .map(|i| (format!("p{i}"), format!("p{}", i + 1)))
            .collect()
    }

    fn make_cycle(n: usize) -> Graph {
        (0..n)
            .map(|i| (format!("p{i}"), format!("p{}", (i + 1) % n)))
            .collect()
    }

    fn make_star(leaves: usize) -> Graph {
        (1..=leaves)
            .map(|i| ("hub".to_string(), format!("leaf{i}")))
            .collect()
    }

    /// Recursive reference DFS used to check the iterative one.
    fn recursive_dfs(
        adjacency: &[Vec<VertexId>],
        v: VertexId,
        visited: &mut [bool],
        pre: &mut Vec<VertexId>,
        post: &mut Vec<VertexId>,
    ) {
        visited[v] = true;
        pre.push(v);
        for &n in &adjacency[v] {
            if !visited[n] {
                recursive_dfs(adjacency, n, visited, pre, post);
            }
        }
        post.push(v);
    }

    // --- BFS distance tests ---

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(6);
        let d = bfs_distances(&g, 0);
        assert_eq!(d, vec![Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn test_bfs_directed_only() {
        let g = make_chain(4);
        let d = bfs_distances(&g, 2);
        assert_eq!(d, vec![None, None, Some(0), Some(1)]);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(100);
        let d = bfs_distances(&g, 0);
        assert!(d[1..].iter().all(|&x| x == Some(1)));
    }

    #[test]
    fn test_bfs_start_out_of_range() {
        let g = make_chain(3);
        let d = bfs_distances(&g, 99);
        assert!(d.iter().all(Option::is_none));
    }

    #[test]
    fn test_bfs_self_loop_and_parallel_edges() {
        let mut g = Graph::new();
        g.add_edge("A", "A");
        g.add_edge("A", "B");
        g.add_edge("A", "B");
        assert_eq!(bfs_distances(&g, 0), vec![Some(0), Some(1)]);
    }

    // --- Shortest path tests ---

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(6);
        assert_eq!(shortest_path(&g, "p0", "p5"), Some(5));
        assert_eq!(shortest_path(&g, "p5", "p0"), None);
    }

    #[test]
    fn test_shortest_path_self() {
        let g = make_chain(3);
        assert_eq!(shortest_path(&g, "p1", "p1"), Some(0));
    }

    #[test]
    fn test_shortest_path_takes_shortcut() {
        let mut g = make_chain(6);
        g.add_edge("p1", "p4");
        assert_eq!(shortest_path(&g, "p0", "p5"), Some(3));
    }

    #[test]
    fn test_shortest_path_cycle() {
        let g = make_cycle(3);
        assert_eq!(shortest_path(&g, "p0", "p2"), Some(2));
        assert_eq!(shortest_path(&g, "p2", "p0"), Some(1));
    }

    #[test]
    fn test_shortest_path_unknown_labels() {
        let g = make_chain(3);
        assert_eq!(shortest_path(&g, "missing", "p0"), None);
        assert_eq!(shortest_path(&g, "p0", "missing"), None);
        assert_eq!(shortest_path(&Graph::new(), "a", "a"), None);
    }

    #[test]
    fn test_shortest_path_isolated_target() {
        let mut g = Graph::new();
        g.add_edge("A", "B");
        g.add_vertex("C");
        assert_eq!(shortest_path(&g, "A", "C"), None);
    }

    // --- Route reconstruction ---

    #[test]
    fn test_shortest_route_chain() {
        let g = make_chain(4);
        let route = shortest_route(&g, "p0", "p3").unwrap();
        assert_eq!(route, vec!["p0", "p1", "p2", "p3"]);
    }

    #[test]
    fn test_shortest_route_self() {
        let g = make_chain(2);
        assert_eq!(shortest_route(&g, "p1", "p1").unwrap(), vec!["p1"]);
    }

    #[test]
    fn test_shortest_route_matches_length() {
        let mut g = make_cycle(8);
        g.add_edge("p0", "p5");
        let route = shortest_route(&g, "p0", "p7").unwrap();
        let hops = shortest_path(&g, "p0", "p7").unwrap();
        assert_eq!(route.len() - 1, hops as usize);
        assert_eq!(route, vec!["p0", "p5", "p6", "p7"]);
    }

    #[test]
    fn test_shortest_route_unreachable() {
        let g = make_chain(3);
        assert!(shortest_route(&g, "p2", "p0").is_none());
        assert!(shortest_route(&g, "p0", "nope").is_none());
    }

    // --- Depth-first tests ---

    #[test]
    fn test_depth_first_matches_recursive_order() {
        let mut g = Graph::new();
        g.load_edges([
            ("a", "b"),
            ("a", "c"),
            ("b", "d"),
            ("d", "a"),
            ("c", "d"),
            ("c", "e"),
            ("e", "c"),
            ("f", "e"),
        ]);
        let n = g.vertex_count();

        let mut visited = vec![false; n];
        let (mut pre, mut post) = (Vec::new(), Vec::new());
        for v in 0..n {
            depth_first(g.forward(), v, &mut visited, |x| pre.push(x), |x| post.push(x));
        }

        let mut ref_visited = vec![false; n];
        let (mut ref_pre, mut ref_post) = (Vec::new(), Vec::new());
        for v in 0..n {
            if !ref_visited[v] {
                recursive_dfs(g.forward(), v, &mut ref_visited, &mut ref_pre, &mut ref_post);
            }
        }

        assert_eq!(pre, ref_pre);
        assert_eq!(post, ref_post);
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn test_depth_first_skips_visited_start() {
        let g = make_chain(3);
        let mut visited = vec![true, false, false];
        let mut entered = Vec::new();
        depth_first(g.forward(), 0, &mut visited, |x| entered.push(x), |_| {});
        assert!(entered.is_empty());
    }

    #[test]
    fn test_depth_first_long_chain_no_overflow() {
        let g = make_chain(200_000);
        let mut visited = vec![false; g.vertex_count()];
        let mut post = Vec::with_capacity(g.vertex_count());
        depth_first(g.forward(), 0, &mut visited, |_| {}, |x| post.push(x));
        assert_eq!(post.len(), 200_000);
        assert_eq!(post[0], 199_999);
        assert_eq!(post[199_999], 0);
    }
}
