//! Run the A* algorithm on a graph using the specified heuristic. Return the
//! path found between the source and target nodes, its cost, and statistics.

use log::{debug, trace};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::heuristic::{EuclideanHeuristic, Heuristic};
use crate::io::{Graph, NodeIndex};
use crate::queue::{IndexedMinQueue, PQEntry};

#[derive(Debug, Serialize)]
pub struct AStarResult {
    #[serde(rename = "source-index")]
    pub source: NodeIndex,
    #[serde(rename = "target-index")]
    pub target: NodeIndex,

    /// The cost of the path found between the source and target nodes.
    #[serde(rename = "distance")]
    pub distance: Option<f64>,
    /// The nodes on the path, source and target included. Empty when no path
    /// was found.
    #[serde(skip)]
    pub path: Vec<NodeIndex>,
    /// How many nodes are on the path.
    #[serde(rename = "path-length")]
    pub path_length: usize,

    /// How many nodes were dequeued from the priority queue.
    #[serde(rename = "stat-nodes-expanded")]
    pub nodes_expanded: usize,
    /// How many nodes were enqueued into the priority queue.
    #[serde(rename = "stat-nodes-generated")]
    pub nodes_generated: usize,

    /// How many times the heuristic was called.
    #[serde(rename = "stat-heuristic-calls")]
    pub heuristic_calls: usize,
    /// How many nodes the heuristic was called on. This is not equal to the
    /// number of calls since we do batching.
    #[serde(rename = "stat-heuristic-nodes")]
    pub heuristic_nodes: usize,

    /// Whether the search gave up because it hit the expansion cutoff.
    #[serde(rename = "cut-off")]
    pub cut_off: bool,

    /// How long the search took, in seconds.
    #[serde(rename = "time-seconds")]
    pub time: f64,
}

impl AStarResult {
    fn new(source: NodeIndex, target: NodeIndex) -> AStarResult {
        AStarResult {
            source,
            target,
            distance: None,
            path: Vec::new(),
            path_length: 0,
            nodes_expanded: 0,
            nodes_generated: 0,
            heuristic_calls: 0,
            heuristic_nodes: 0,
            cut_off: false,
            time: 0.0,
        }
    }

    pub fn found(&self) -> bool {
        self.distance.is_some()
    }
}

/// Per-node bookkeeping for one search.
#[derive(Debug, Clone, Copy)]
struct SearchState {
    gscore: f64,
    hscore: f64,
    fscore: f64,
    parent: Option<NodeIndex>,
}

impl SearchState {
    fn new(hscore: f64) -> SearchState {
        SearchState {
            gscore: f64::INFINITY,
            hscore,
            fscore: f64::INFINITY,
            parent: None,
        }
    }

    fn set_gscore(&mut self, gscore: f64) {
        self.gscore = gscore;
        self.fscore = gscore + self.hscore;
    }

    fn entry(&self, node_id: NodeIndex) -> PQEntry {
        PQEntry {
            node_id,
            fscore: self.fscore,
            gscore: self.gscore,
        }
    }
}

/// Search for a cheapest path from `source` to `target`.
///
/// The path is optimal when the heuristic is admissible and consistent. If
/// it isn't, a path is still returned when one exists, but it may cost more
/// than necessary.
///
/// With a `cutoff`, at most that many nodes are expanded. A search that runs
/// out of budget reports no path and sets `cut_off`.
pub fn astar(
    graph: &Graph,
    heur: &dyn Heuristic,
    source: NodeIndex,
    target: NodeIndex,
    cutoff: Option<usize>,
) -> Result<AStarResult> {
    graph.check_node(source)?;
    graph.check_node(target)?;

    // Keep track of statistics
    let mut ret = AStarResult::new(source, target);
    let start_time = std::time::Instant::now();

    // All the H scores up front, in one batch.
    let all_nodes = (0..graph.num_nodes()).collect::<Vec<NodeIndex>>();
    let hscores = heur.estimate(graph, target, &all_nodes);
    ret.heuristic_calls += 1;
    ret.heuristic_nodes += all_nodes.len();
    let mut states = hscores
        .into_iter()
        .enumerate()
        .map(|(node, h)| check_estimate(node, h).map(SearchState::new))
        .collect::<Result<Vec<SearchState>>>()?;
    if states.len() != graph.num_nodes() {
        return Err(Error::InvalidHeuristic {
            node: states.len().min(graph.num_nodes()),
            reason: format!(
                "returned {} estimates for {} nodes",
                states.len(),
                graph.num_nodes()
            ),
        });
    }

    let mut open = IndexedMinQueue::new(graph.num_nodes());
    states[source].set_gscore(0.0);
    open.insert(states[source].entry(source));
    ret.nodes_generated += 1;

    // The main loop of A*
    loop {
        // An empty queue means the search is over, whatever the budget.
        if !open.is_empty() && cutoff.is_some_and(|limit| ret.nodes_expanded >= limit) {
            ret.cut_off = true;
            break;
        }
        let Some(current) = open.extract_min() else {
            break;
        };
        ret.nodes_expanded += 1;

        // The first time the target comes out of the queue its G score is
        // final.
        if current.node_id == target {
            ret.distance = Some(states[target].gscore);
            ret.path = reconstruct_path(&states, source, target);
            ret.path_length = ret.path.len();
            break;
        }

        // Queued entries are overwritten in place, so they never go stale.
        let cur_gscore = current.gscore;
        debug_assert_eq!(cur_gscore, states[current.node_id].gscore);
        for &(neighbor, edge_index) in graph.neighbors(current.node_id) {
            let tentative = cur_gscore + graph.edge(edge_index).cost;
            let state = &mut states[neighbor];
            if tentative >= state.gscore {
                continue;
            }

            trace!(
                "relax {} -> {}: {} -> {}",
                current.node_id,
                neighbor,
                state.gscore,
                tentative
            );
            state.parent = Some(current.node_id);
            state.set_gscore(tentative);
            let entry = state.entry(neighbor);
            if open.contains(neighbor) {
                open.decrease_key(entry);
            } else {
                open.insert(entry);
                ret.nodes_generated += 1;
            }
        }
    }

    ret.time = start_time.elapsed().as_secs_f64();
    debug!(
        "A* {} -> {}: distance {:?}, {} expanded, {} generated, cut off: {}",
        source, target, ret.distance, ret.nodes_expanded, ret.nodes_generated, ret.cut_off
    );
    Ok(ret)
}

/// Find a path with the default Euclidean heuristic. Returns the path and
/// whether one was found; the path is empty when it wasn't.
pub fn find_path(
    graph: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Result<(Vec<NodeIndex>, bool)> {
    let res = astar(graph, &EuclideanHeuristic::default(), start, goal, None)?;
    let found = res.found();
    Ok((res.path, found))
}

/// Total cost of walking `path`, taking the cheapest edge between each pair
/// of consecutive nodes. `None` if some pair isn't adjacent or a node is out
/// of range.
pub fn path_cost(graph: &Graph, path: &[NodeIndex]) -> Option<f64> {
    if path.iter().any(|&n| n >= graph.num_nodes()) {
        return None;
    }
    path.windows(2)
        .map(|pair| {
            graph
                .neighbors(pair[0])
                .iter()
                .filter(|&&(neighbor, _)| neighbor == pair[1])
                .map(|&(_, edge)| graph.edge(edge).cost)
                .min_by(f64::total_cmp)
        })
        .sum()
}

fn check_estimate(node: NodeIndex, h: f64) -> Result<f64> {
    if h.is_nan() || h < 0.0 {
        Err(Error::InvalidHeuristic {
            node,
            reason: format!("estimate {h} is not a non-negative number"),
        })
    } else {
        Ok(h)
    }
}

/// Follow parent links back from the target. Only called once the target has
/// been reached, so the chain ends at the source.
fn reconstruct_path(states: &[SearchState], source: NodeIndex, target: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![target];
    let mut at = target;
    while let Some(parent) = states[at].parent {
        path.push(parent);
        at = parent;
    }
    debug_assert_eq!(at, source);
    path.reverse();
    path
}
