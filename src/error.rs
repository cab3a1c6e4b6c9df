//! Errors that can come out of building a graph, configuring a run, or
//! searching. An unreachable goal is not an error: the search reports it
//! through its result instead.

use thiserror::Error;

use crate::io::NodeIndex;

#[derive(Error, Debug)]
pub enum Error {
    #[error("node {id} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { id: NodeIndex, num_nodes: usize },

    #[error("edge {index} is a self-loop on node {node}")]
    SelfLoop { index: usize, node: NodeIndex },

    #[error("edge {index} has invalid cost {cost} (must be finite and non-negative)")]
    InvalidCost { index: usize, cost: f64 },

    #[error("node {id} has a non-finite position ({x}, {y})")]
    InvalidPosition { id: NodeIndex, x: f64, y: f64 },

    #[error("node rows must be numbered in order: expected id {expected}, found {found}")]
    UnexpectedNodeId { expected: NodeIndex, found: NodeIndex },

    #[error("heuristic gave an invalid estimate for node {node}: {reason}")]
    InvalidHeuristic { node: NodeIndex, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Argument parsing stopped early, either because of bad arguments or
    /// because help was printed. Carries the exit code to use.
    #[error("argument parsing exited with code {0}")]
    Usage(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
}

pub type Result<T> = std::result::Result<T, Error>;
