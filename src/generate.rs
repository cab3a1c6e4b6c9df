//! Random graphs for trying the search out. Generation is a pure function of
//! its parameters: the same `RandomGraph` always yields the same graph.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::io::{Edge, Graph};

pub const DEFAULT_COORDINATE_RANGE: u32 = 1000;
pub const DEFAULT_MAX_COST: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomGraph {
    pub nodes: usize,
    pub edges: usize,
    pub seed: u64,
    /// Coordinates are integers in `[-coordinate_range, coordinate_range)`.
    pub coordinate_range: u32,
    /// Edge costs are integers in `[1, max_cost]`.
    pub max_cost: u32,
    /// Put the first node at the bottom-left corner and the last node at the
    /// top-right one, so a query between them crosses the whole plane.
    pub pin_endpoints: bool,
    /// Spend the first `nodes - 1` edges on a random chain through every
    /// node, so the graph is connected.
    pub connected: bool,
}

impl RandomGraph {
    pub fn new(nodes: usize, edges: usize, seed: u64) -> RandomGraph {
        RandomGraph {
            nodes,
            edges,
            seed,
            coordinate_range: DEFAULT_COORDINATE_RANGE,
            max_cost: DEFAULT_MAX_COST,
            pin_endpoints: true,
            connected: false,
        }
    }
}

pub fn random_graph(params: &RandomGraph) -> Result<Graph> {
    let n = params.nodes;
    if params.edges > 0 && n < 2 {
        return Err(Error::Config(format!(
            "cannot place {} edges on a graph with {} nodes",
            params.edges, n
        )));
    }
    if params.connected && n > 1 && params.edges < n - 1 {
        return Err(Error::Config(format!(
            "a connected graph on {} nodes needs at least {} edges, got {}",
            n,
            n - 1,
            params.edges
        )));
    }
    if params.max_cost == 0 {
        return Err(Error::Config("`max-cost` must be at least 1".into()));
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let range = i64::from(params.coordinate_range);
    let coordinate = |rng: &mut StdRng| -> f64 {
        if range == 0 {
            0.0
        } else {
            rng.gen_range(-range..range) as f64
        }
    };

    let mut positions = (0..n)
        .map(|_| (coordinate(&mut rng), coordinate(&mut rng)))
        .collect::<Vec<(f64, f64)>>();
    if params.pin_endpoints && n > 0 {
        let r = range as f64;
        positions[0] = (-r, -r);
        positions[n - 1] = (r, r);
    }

    let mut edges = Vec::with_capacity(params.edges);
    if params.connected && n > 1 {
        let mut order = (0..n).collect::<Vec<usize>>();
        order.shuffle(&mut rng);
        for pair in order.windows(2) {
            let cost = rng.gen_range(1..=params.max_cost);
            edges.push(Edge {
                from: pair[0],
                to: pair[1],
                cost: f64::from(cost),
            });
        }
    }
    while edges.len() < params.edges {
        let from = rng.gen_range(0..n);
        let mut to = rng.gen_range(0..n);
        if from == to {
            to = (to + 1) % n;
        }
        let cost = rng.gen_range(1..=params.max_cost);
        edges.push(Edge {
            from,
            to,
            cost: f64::from(cost),
        });
    }

    Graph::new(positions, edges)
}
