//! Always estimate zero. With this heuristic A* behaves exactly like
//! Dijkstra's algorithm, so it doubles as a reference for the others.

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::io::{Graph, NodeIndex};

#[derive(Debug, Default, Clone, Copy)]
pub struct NullHeuristic;

impl Heuristic for NullHeuristic {
    fn estimate(&self, _graph: &Graph, _target: NodeIndex, queries: &[NodeIndex]) -> Vec<f64> {
        vec![0.0; queries.len()]
    }
}

impl NullHeuristic {
    /// Parse arguments to create the heuristic.
    pub fn create(args: Vec<String>) -> Result<NullHeuristic> {
        {
            let mut ap = argparse::ArgumentParser::new();
            ap.set_description("Null heuristic");

            ap.parse(args, &mut std::io::stdout(), &mut std::io::stderr())
                .map_err(Error::Usage)?;
        }
        Ok(NullHeuristic)
    }
}
