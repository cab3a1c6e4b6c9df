//! # Graph Search Heuristics
//!
//! This module provides heuristics that are used by A*. It provides a common
//! trait for them, as well as the Euclidean and null heuristics.

pub mod euclidean;
pub mod null;

use crate::error::{Error, Result};
use crate::io::{Graph, NodeIndex};

pub use euclidean::EuclideanHeuristic;
pub use null::NullHeuristic;

pub trait Heuristic {
    /// Given a target vertex and a list of query vertices, return the estimated
    /// distance from each query vertex to the target vertex. The estimates are
    /// returned in the same order as the query vertices.
    fn estimate(&self, graph: &Graph, target: NodeIndex, queries: &[NodeIndex]) -> Vec<f64>;
}

/// Build the heuristic called `name`. The first element of `args` is the
/// program name as far as the heuristic's own argument parser is concerned.
pub fn create(name: &str, args: Vec<String>) -> Result<Box<dyn Heuristic>> {
    match name {
        "euclidean" => Ok(Box::new(EuclideanHeuristic::create(args)?)),
        "null" => Ok(Box::new(NullHeuristic::create(args)?)),
        _ => Err(Error::Config(format!(
            "unknown heuristic `{name}` (expected: euclidean or null)"
        ))),
    }
}
