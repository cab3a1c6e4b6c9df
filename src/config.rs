//! The YAML configuration file: where the graph comes from, which queries to
//! run, and where to put the renderings.

use std::path::{Path, PathBuf};

use log::info;
use yaml_rust::{Yaml, YamlLoader};

use crate::error::{Error, Result};
use crate::generate::{RandomGraph, DEFAULT_COORDINATE_RANGE, DEFAULT_MAX_COST};
use crate::io::NodeIndex;

#[derive(Debug, Clone, PartialEq)]
pub enum GraphSource {
    Random(RandomGraph),
    Files { nodes: PathBuf, edges: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub graph: GraphSource,
    /// Defaults to the first node.
    pub start: Option<NodeIndex>,
    /// Defaults to the last node.
    pub goal: Option<NodeIndex>,
    pub pairs_file: Option<PathBuf>,
    pub cutoff: Option<usize>,
    pub full_graph_dot: Option<PathBuf>,
    pub path_dot: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Config> {
        let docs = YamlLoader::load_from_str(text)?;
        let doc = docs
            .first()
            .ok_or_else(|| Error::Config("configuration is empty".into()))?;

        let graph = &doc["graph"];
        if !is_missing(&graph["random"]) && !is_missing(&graph["nodes-file"]) {
            return Err(Error::Config(
                "`graph` sets both `random` and `nodes-file`; pick one".into(),
            ));
        }
        let graph = if !is_missing(&graph["random"]) {
            GraphSource::Random(random_graph(&graph["random"])?)
        } else if !is_missing(&graph["nodes-file"]) {
            GraphSource::Files {
                nodes: required(opt_path(graph, "nodes-file")?, "graph.nodes-file")?,
                edges: required(opt_path(graph, "edges-file")?, "graph.edges-file")?,
            }
        } else {
            return Err(Error::Config(
                "`graph` needs either `random` or `nodes-file` and `edges-file`".into(),
            ));
        };

        let render = &doc["render"];
        Ok(Config {
            graph,
            start: opt_usize(doc, "start")?,
            goal: opt_usize(doc, "goal")?,
            pairs_file: opt_path(doc, "pairs-file")?,
            cutoff: opt_usize(doc, "expansion-cutoff")?,
            full_graph_dot: opt_path(render, "full-graph")?,
            path_dot: opt_path(render, "shortest-path")?,
        })
    }
}

fn random_graph(yaml: &Yaml) -> Result<RandomGraph> {
    let nodes = required(opt_usize(yaml, "nodes")?, "graph.random.nodes")?;
    let edges = required(opt_usize(yaml, "edges")?, "graph.random.edges")?;
    let seed = match opt_u64(yaml, "seed")? {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("No seed given, using {}", seed);
            seed
        }
    };

    let mut params = RandomGraph::new(nodes, edges, seed);
    params.coordinate_range =
        opt_u32(yaml, "coordinate-range")?.unwrap_or(DEFAULT_COORDINATE_RANGE);
    params.max_cost = opt_u32(yaml, "max-cost")?.unwrap_or(DEFAULT_MAX_COST);
    params.pin_endpoints = opt_bool(yaml, "pin-endpoints")?.unwrap_or(true);
    params.connected = opt_bool(yaml, "connected")?.unwrap_or(false);
    Ok(params)
}

fn is_missing(yaml: &Yaml) -> bool {
    matches!(yaml, Yaml::BadValue | Yaml::Null)
}

fn required<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| Error::Config(format!("missing required key `{key}`")))
}

fn opt_u64(yaml: &Yaml, key: &str) -> Result<Option<u64>> {
    match &yaml[key] {
        v if is_missing(v) => Ok(None),
        Yaml::Integer(i) => u64::try_from(*i)
            .map(Some)
            .map_err(|_| Error::Config(format!("`{key}` must not be negative, got {i}"))),
        _ => Err(Error::Config(format!("`{key}` must be an integer"))),
    }
}

fn opt_usize(yaml: &Yaml, key: &str) -> Result<Option<usize>> {
    opt_u64(yaml, key)?
        .map(|v| usize::try_from(v).map_err(|_| Error::Config(format!("`{key}` is too large"))))
        .transpose()
}

fn opt_u32(yaml: &Yaml, key: &str) -> Result<Option<u32>> {
    opt_u64(yaml, key)?
        .map(|v| u32::try_from(v).map_err(|_| Error::Config(format!("`{key}` is too large"))))
        .transpose()
}

fn opt_bool(yaml: &Yaml, key: &str) -> Result<Option<bool>> {
    match &yaml[key] {
        v if is_missing(v) => Ok(None),
        Yaml::Boolean(b) => Ok(Some(*b)),
        _ => Err(Error::Config(format!("`{key}` must be true or false"))),
    }
}

fn opt_path(yaml: &Yaml, key: &str) -> Result<Option<PathBuf>> {
    match &yaml[key] {
        v if is_missing(v) => Ok(None),
        Yaml::String(s) => Ok(Some(PathBuf::from(s))),
        _ => Err(Error::Config(format!("`{key}` must be a path"))),
    }
}
