//! Shortest paths on weighted undirected graphs with A*.
//!
//! The search itself lives in [`astar`], on top of the indexed heap in
//! [`queue`]. Graphs come from [`generate`] or from files via [`io`], and
//! [`render`] draws them, with a path highlighted, as Graphviz DOT.

pub mod astar;
pub mod config;
pub mod error;
pub mod generate;
pub mod heuristic;
pub mod io;
pub mod queue;
pub mod render;

pub use astar::{astar, find_path, AStarResult};
pub use error::{Error, Result};
pub use io::{Edge, Graph, Node, NodeIndex};
