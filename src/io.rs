//! Structures that we read from files, and the graph they build. The `Graph`
//! struct is used everywhere else (search, rendering, generation), so it
//! lives here next to the records it is loaded from.

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::config::{Config, GraphSource};
use crate::error::{Error, Result};
use crate::generate;
use crate::heuristic::{self, Heuristic};

/// Everything we do deals with node indicies, which are just numbers.
pub type NodeIndex = usize;

/// A node of the graph. The position is only used by heuristics and for
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeIndex,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// Straight-line distance between two nodes.
    pub fn distance(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An undirected, weighted edge. It can be walked in either direction for
/// the same cost.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Edge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub cost: f64,
}

impl Edge {
    /// Whether this edge joins `a` and `b`, in either direction.
    pub fn joins(&self, a: NodeIndex, b: NodeIndex) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Immutable graph. Nodes are numbered `0..num_nodes`, and edges keep the
/// order they were given in.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// For every node, the neighbors it can reach and the index of the edge
    /// that gets there.
    adjacency_list: Vec<Vec<(NodeIndex, usize)>>,
}

impl Graph {
    /// Build a graph from node positions and edges, rejecting anything the
    /// search can't handle.
    pub fn new(positions: Vec<(f64, f64)>, edges: Vec<Edge>) -> Result<Graph> {
        let nodes = positions
            .into_iter()
            .enumerate()
            .map(|(id, (x, y))| {
                if x.is_finite() && y.is_finite() {
                    Ok(Node { id, x, y })
                } else {
                    Err(Error::InvalidPosition { id, x, y })
                }
            })
            .collect::<Result<Vec<Node>>>()?;

        let num_nodes = nodes.len();
        let mut adjacency_list = vec![Vec::new(); num_nodes];
        for (index, edge) in edges.iter().enumerate() {
            for id in [edge.from, edge.to] {
                if id >= num_nodes {
                    return Err(Error::NodeOutOfRange { id, num_nodes });
                }
            }
            if edge.from == edge.to {
                return Err(Error::SelfLoop {
                    index,
                    node: edge.from,
                });
            }
            if !edge.cost.is_finite() || edge.cost < 0.0 {
                return Err(Error::InvalidCost {
                    index,
                    cost: edge.cost,
                });
            }
            adjacency_list[edge.from].push((edge.to, index));
            adjacency_list[edge.to].push((edge.from, index));
        }

        Ok(Graph {
            nodes,
            edges,
            adjacency_list,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeIndex) -> &Node {
        &self.nodes[id]
    }

    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// Neighbors of `id` paired with the index of the connecting edge.
    /// Parallel edges show up once each.
    pub fn neighbors(&self, id: NodeIndex) -> &[(NodeIndex, usize)] {
        &self.adjacency_list[id]
    }

    /// Make sure `id` names a node of this graph.
    pub fn check_node(&self, id: NodeIndex) -> Result<()> {
        if id < self.num_nodes() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                id,
                num_nodes: self.num_nodes(),
            })
        }
    }
}

/// One row of the nodes file.
#[derive(Debug, Deserialize)]
pub struct NodeRecord {
    pub id: NodeIndex,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TestPair {
    #[serde(rename = "source-index")]
    pub source: NodeIndex,
    #[serde(rename = "target-index")]
    pub target: NodeIndex,
}

/// Load a graph from a nodes file (`id,x,y`) and an edges file
/// (`from,to,cost`). Node ids have to be listed in order starting at zero.
pub fn load_graph(nodes_path: &Path, edges_path: &Path) -> Result<Graph> {
    let mut positions = Vec::new();
    for (expected, record) in csv::Reader::from_path(nodes_path)?
        .deserialize()
        .enumerate()
    {
        let record: NodeRecord = record?;
        if record.id != expected {
            return Err(Error::UnexpectedNodeId {
                expected,
                found: record.id,
            });
        }
        positions.push((record.x, record.y));
    }

    let edges = csv::Reader::from_path(edges_path)?
        .deserialize()
        .collect::<std::result::Result<Vec<Edge>, csv::Error>>()?;

    Graph::new(positions, edges)
}

/// Read the pairs of nodes to run queries between.
pub fn read_test_pairs(path: &Path) -> Result<Vec<TestPair>> {
    let pairs = csv::Reader::from_path(path)?
        .deserialize()
        .collect::<std::result::Result<Vec<TestPair>, csv::Error>>()?;
    Ok(pairs)
}

/// Everything a run needs, built from the configuration file and the command
/// line.
pub struct EvaluatedArgs {
    pub config: Config,
    pub graph: Graph,
    pub heuristic: Box<dyn Heuristic>,
    /// The query whose path gets rendered.
    pub primary: TestPair,
    /// Extra queries from the pairs file, if any.
    pub test_pairs: Vec<TestPair>,
}

/// Read the configuration, build the graph and the heuristic, and collect
/// the queries to run. Every query endpoint is checked against the graph.
pub fn eval_args(
    config_path: &Path,
    heuristic_name: &str,
    heuristic_args: Vec<String>,
) -> Result<EvaluatedArgs> {
    let heuristic = heuristic::create(heuristic_name, heuristic_args)?;

    info!("Loading configuration from {}...", config_path.display());
    let config = Config::load(config_path)?;

    let graph = match &config.graph {
        GraphSource::Random(params) => {
            info!(
                "Generating random graph with {} nodes and {} edges (seed {})...",
                params.nodes, params.edges, params.seed
            );
            generate::random_graph(params)?
        }
        GraphSource::Files { nodes, edges } => {
            info!(
                "Loading graph from {} and {}...",
                nodes.display(),
                edges.display()
            );
            load_graph(nodes, edges)?
        }
    };

    let primary = TestPair {
        source: config.start.unwrap_or(0),
        target: config
            .goal
            .unwrap_or_else(|| graph.num_nodes().saturating_sub(1)),
    };
    let test_pairs = match &config.pairs_file {
        Some(path) => read_test_pairs(path)?,
        None => Vec::new(),
    };
    for pair in std::iter::once(&primary).chain(test_pairs.iter()) {
        graph.check_node(pair.source)?;
        graph.check_node(pair.target)?;
    }

    Ok(EvaluatedArgs {
        config,
        graph,
        heuristic,
        primary,
        test_pairs,
    })
}
