//! Write a graph in Graphviz DOT format, with the edges of a path drawn in
//! red. Nodes are pinned at their coordinates (`pos="x,y!"`), so
//! `neato -n` reproduces the layout.

use std::collections::HashSet;
use std::io::Write;

use crate::io::{Graph, NodeIndex};

/// Write `graph` to `out`. Edges joining consecutive nodes of `path` are
/// highlighted; pass an empty path to render the graph alone.
pub fn write_dot<W: Write>(graph: &Graph, path: &[NodeIndex], out: &mut W) -> std::io::Result<()> {
    let on_path = path
        .windows(2)
        .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
        .collect::<HashSet<(NodeIndex, NodeIndex)>>();

    writeln!(out, "graph G {{")?;
    writeln!(out, "    layout=dot;")?;

    for edge in graph.edges() {
        let key = (edge.from.min(edge.to), edge.from.max(edge.to));
        if on_path.contains(&key) {
            writeln!(
                out,
                "    {} -- {} [color=red, penwidth=2.0];",
                edge.from, edge.to
            )?;
        } else {
            writeln!(
                out,
                "    {} -- {} [label=\"{:.2}\"];",
                edge.from, edge.to, edge.cost
            )?;
        }
    }

    for node in graph.nodes() {
        writeln!(
            out,
            "    {} [label=\"{}\", pos=\"{:.2},{:.2}!\"];",
            node.id, node.id, node.x, node.y
        )?;
    }

    writeln!(out, "}}")
}

/// Same as [`write_dot`], collected into a `String`.
pub fn to_dot(graph: &Graph, path: &[NodeIndex]) -> String {
    let mut buf = Vec::new();
    write_dot(graph, path, &mut buf).expect("writing to a Vec never fails");
    String::from_utf8_lossy(&buf).into_owned()
}
