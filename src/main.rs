use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use argparse::ArgumentParser;
use log::{error, info, warn};

use graph_astar::astar;
use graph_astar::io::{self, EvaluatedArgs};
use graph_astar::render;
use graph_astar::{Error, Graph, NodeIndex, Result};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Handle argument parsing
    // See: https://crates.io/crates/argparse
    let mut config_path = String::from("config.yaml");
    let mut output_path = String::from("results.csv");
    let mut heuristic_name = String::from("euclidean");
    let mut heuristic_args = Vec::<String>::new();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Shortest paths on weighted undirected graphs with A*");
        ap.refer(&mut config_path).metavar("CONFIG").add_option(
            &["-c", "--config"],
            argparse::Store,
            "Path to the configuration file",
        );
        ap.refer(&mut output_path).metavar("OUTPUT").add_option(
            &["-o", "--output"],
            argparse::Store,
            "Path to the output file",
        );
        ap.refer(&mut heuristic_name)
            .metavar("HEURISTIC")
            .add_argument("heuristic-name", argparse::Store, "Which heuristic to use");
        ap.refer(&mut heuristic_args)
            .metavar("HEURISTIC_ARGS")
            .add_argument(
                "heuristic-args",
                argparse::List,
                "Arguments for the heuristic",
            );
        ap.stop_on_first_argument(true);
        ap.parse_args_or_exit();
    }
    heuristic_args.insert(0, heuristic_name.clone());

    let code = match run(
        Path::new(&config_path),
        Path::new(&output_path),
        &heuristic_name,
        heuristic_args,
    ) {
        Ok(()) => 0,
        Err(Error::Usage(code)) => code,
        Err(e) => {
            error!("{}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run(
    config_path: &Path,
    output_path: &Path,
    heuristic_name: &str,
    heuristic_args: Vec<String>,
) -> Result<()> {
    // Parse the arguments and build the internal structures
    let EvaluatedArgs {
        config,
        graph,
        heuristic,
        primary,
        test_pairs,
    } = io::eval_args(config_path, heuristic_name, heuristic_args)?;

    if let Some(path) = &config.full_graph_dot {
        write_dot(&graph, &[], path)?;
    }

    // Create a CSV writer for the output
    let mut output = csv::Writer::from_path(output_path)?;

    info!(
        "Searching from {} to {}...",
        primary.source, primary.target
    );
    let res = astar::astar(
        &graph,
        heuristic.as_ref(),
        primary.source,
        primary.target,
        config.cutoff,
    )?;
    match res.distance {
        Some(distance) => info!(
            "Shortest path costs {:.2}: {}",
            distance,
            format_path(&res.path)
        ),
        None if res.cut_off => warn!(
            "Gave up after expanding {} nodes",
            res.nodes_expanded
        ),
        None => warn!("No path from {} to {}", primary.source, primary.target),
    }
    if let Some(path) = &config.path_dot {
        write_dot(&graph, &res.path, path)?;
    }
    output.serialize(&res)?;

    // Run A* on the test pairs
    if !test_pairs.is_empty() {
        info!("Running A* on {} test pairs...", test_pairs.len());
    }
    for (i, tp) in test_pairs.iter().enumerate() {
        let res = astar::astar(
            &graph,
            heuristic.as_ref(),
            tp.source,
            tp.target,
            config.cutoff,
        )?;
        output.serialize(&res)?;
        info!("Processed test pair {}", i + 1);
    }

    output.flush()?;
    info!("Wrote results to {}", output_path.display());
    Ok(())
}

fn write_dot(graph: &Graph, path: &[NodeIndex], out: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(out)?);
    render::write_dot(graph, path, &mut file)?;
    file.flush()?;
    info!("Wrote {}", out.display());
    Ok(())
}

fn format_path(path: &[NodeIndex]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
