//! Straight-line distance to the target, optionally scaled. This is only
//! admissible when no edge is cheaper than the distance between its
//! endpoints (times the weight). Otherwise A* still finds a path, but it may
//! not be the shortest one.

use crate::error::{Error, Result};
use crate::heuristic::Heuristic;
use crate::io::{Graph, NodeIndex};

#[derive(Debug, Clone, Copy)]
pub struct EuclideanHeuristic {
    weight: f64,
}

impl Default for EuclideanHeuristic {
    fn default() -> Self {
        EuclideanHeuristic { weight: 1.0 }
    }
}

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, graph: &Graph, target: NodeIndex, queries: &[NodeIndex]) -> Vec<f64> {
        let t = graph.node(target);
        queries
            .iter()
            .map(|&q| self.weight * graph.node(q).distance(t))
            .collect()
    }
}

impl EuclideanHeuristic {
    pub fn with_weight(weight: f64) -> Result<EuclideanHeuristic> {
        if weight.is_finite() && weight >= 0.0 {
            Ok(EuclideanHeuristic { weight })
        } else {
            Err(Error::Config(format!(
                "heuristic weight must be finite and non-negative, got {weight}"
            )))
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Parse arguments to create the heuristic.
    pub fn create(args: Vec<String>) -> Result<EuclideanHeuristic> {
        let mut weight = 1.0f64;
        {
            let mut ap = argparse::ArgumentParser::new();
            ap.set_description("Euclidean distance heuristic");
            ap.refer(&mut weight).metavar("WEIGHT").add_option(
                &["-w", "--weight"],
                argparse::Store,
                "Factor to scale the straight-line distance by",
            );

            ap.parse(args, &mut std::io::stdout(), &mut std::io::stderr())
                .map_err(Error::Usage)?;
        }
        EuclideanHeuristic::with_weight(weight)
    }
}
