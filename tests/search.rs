use graph_astar::astar::{astar, find_path, path_cost};
use graph_astar::generate::{random_graph, RandomGraph};
use graph_astar::heuristic::{EuclideanHeuristic, Heuristic, NullHeuristic};
use graph_astar::{Edge, Graph, NodeIndex};

fn graph(positions: &[(f64, f64)], edges: &[(NodeIndex, NodeIndex, f64)]) -> Graph {
    Graph::new(
        positions.to_vec(),
        edges
            .iter()
            .map(|&(from, to, cost)| Edge { from, to, cost })
            .collect(),
    )
    .unwrap()
}

/// Bellman-Ford distances from `source`, independent of the heuristic search.
fn reference_distances(graph: &Graph, source: NodeIndex) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; graph.num_nodes()];
    dist[source] = 0.0;
    for _ in 0..graph.num_nodes() {
        let mut changed = false;
        for e in graph.edges() {
            for (a, b) in [(e.from, e.to), (e.to, e.from)] {
                if dist[a] + e.cost < dist[b] {
                    dist[b] = dist[a] + e.cost;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

/// A random graph whose edges never cost less than the straight-line
/// distance between their endpoints, so the Euclidean heuristic is
/// admissible and consistent on it.
fn metric_graph(seed: u64) -> Graph {
    let mut params = RandomGraph::new(40, 120, seed);
    params.coordinate_range = 100;
    let base = random_graph(&params).unwrap();
    let edges = base
        .edges()
        .iter()
        .map(|e| Edge {
            cost: base.node(e.from).distance(base.node(e.to)) * (1.0 + e.cost / 100.0),
            ..*e
        })
        .collect();
    let positions = base.nodes().iter().map(|n| (n.x, n.y)).collect();
    Graph::new(positions, edges).unwrap()
}

fn assert_valid_path(graph: &Graph, path: &[NodeIndex], start: NodeIndex, goal: NodeIndex) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert!(
            graph.edges().iter().any(|e| e.joins(pair[0], pair[1])),
            "no edge between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn diagonal_beats_two_hops() {
    let g = graph(
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
        &[
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (0, 3, 1.0),
            (0, 2, 1.5),
        ],
    );
    let (path, found) = find_path(&g, 0, 2).unwrap();
    assert!(found);
    assert_eq!(path, vec![0, 2]);
    assert_eq!(path_cost(&g, &path), Some(1.5));
}

#[test]
fn disconnected_goal_gives_empty_path() {
    let g = graph(
        &[(0.0, 0.0), (1.0, 0.0), (5.0, 5.0), (6.0, 5.0)],
        &[(0, 1, 1.0), (2, 3, 1.0)],
    );
    let (path, found) = find_path(&g, 0, 3).unwrap();
    assert!(!found);
    assert!(path.is_empty());

    let res = astar(&g, &NullHeuristic, 0, 3, None).unwrap();
    assert_eq!(res.distance, None);
    assert_eq!(res.path_length, 0);
    assert!(!res.cut_off);
    assert_eq!(res.nodes_expanded, 2);
}

#[test]
fn isolated_goal_without_edges() {
    let g = graph(&[(0.0, 0.0), (1.0, 1.0)], &[]);
    let (path, found) = find_path(&g, 0, 1).unwrap();
    assert!(!found);
    assert!(path.is_empty());
}

#[test]
fn parallel_edges_use_the_cheapest() {
    let g = graph(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 1, 5.0), (1, 0, 2.0)]);
    let res = astar(&g, &EuclideanHeuristic::default(), 0, 1, None).unwrap();
    assert_eq!(res.distance, Some(2.0));
    assert_eq!(res.path, vec![0, 1]);
}

#[test]
fn matches_reference_on_random_graphs() {
    for seed in 0..20 {
        let g = metric_graph(seed);
        let goal = g.num_nodes() - 1;
        let reference = reference_distances(&g, 0);

        let euclidean = EuclideanHeuristic::default();
        let heuristics: [&dyn Heuristic; 2] = [&euclidean, &NullHeuristic];
        for heur in heuristics {
            let res = astar(&g, heur, 0, goal, None).unwrap();
            if reference[goal].is_infinite() {
                assert!(!res.found(), "seed {seed}: found a path that doesn't exist");
                assert!(res.path.is_empty());
                continue;
            }
            let distance = res.distance.expect("reachable goal must be found");
            assert!(
                (distance - reference[goal]).abs() < 1e-9,
                "seed {seed}: {distance} vs {}",
                reference[goal]
            );
            assert_valid_path(&g, &res.path, 0, goal);
            let walked = path_cost(&g, &res.path).unwrap();
            assert!((walked - distance).abs() < 1e-9);
        }
    }
}

#[test]
fn repeated_searches_agree() {
    let mut params = RandomGraph::new(60, 240, 42);
    params.connected = true;
    let g = random_graph(&params).unwrap();

    let first = astar(&g, &EuclideanHeuristic::default(), 0, 59, None).unwrap();
    let second = astar(&g, &EuclideanHeuristic::default(), 0, 59, None).unwrap();
    assert!(first.found());
    assert_eq!(first.path, second.path);
    assert_eq!(first.distance, second.distance);
    assert_valid_path(&g, &first.path, 0, 59);
}

#[test]
fn inadmissible_heuristic_still_finds_a_path() {
    // Random integer costs are far below the coordinate distances, so the
    // plain Euclidean estimate overshoots. The path must still be real.
    let mut params = RandomGraph::new(50, 200, 9);
    params.connected = true;
    let g = random_graph(&params).unwrap();

    let res = astar(&g, &EuclideanHeuristic::default(), 0, 49, None).unwrap();
    assert!(res.found());
    assert_valid_path(&g, &res.path, 0, 49);
    let reference = reference_distances(&g, 0);
    assert!(res.distance.unwrap() >= reference[49] - 1e-9);
}

#[test]
fn cutoff_reports_no_path() {
    let g = graph(
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
        &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)],
    );

    let res = astar(&g, &NullHeuristic, 0, 4, Some(3)).unwrap();
    assert!(!res.found());
    assert!(res.cut_off);
    assert!(res.path.is_empty());
    assert_eq!(res.nodes_expanded, 3);

    let full = astar(&g, &NullHeuristic, 0, 4, Some(5)).unwrap();
    assert!(full.found());
    assert!(!full.cut_off);
    assert_eq!(full.path, vec![0, 1, 2, 3, 4]);
}
