use std::path::PathBuf;
use std::time::Duration;

use algoviz_core::{ArrayModel, Frame, RecordingTape, SortAlgorithm, SortAnimator, SortOutcome};
use algoviz_tui::{logging, run_tui, AppConfig, LogTarget};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use graph::{Graph, NodeId, Point, TraversalMethod, TraversalState};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "algoviz")]
#[command(about = "Watch sorting algorithms and graph traversals step by step", long_about = None)]
struct Cli {
    /// TOML config file for the terminal UI
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Raise log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal UI
    Tui,
    /// Sort an array without the UI
    Sort {
        /// bubble, selection, insertion, merge or quick
        #[arg(short, long)]
        algorithm: SortAlgorithm,
        /// Explicit values, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with = "size", allow_hyphen_values = true)]
        values: Option<Vec<i32>>,
        /// Number of random values
        #[arg(long, default_value = "10")]
        size: usize,
        /// Seed for the random values
        #[arg(long)]
        seed: Option<u64>,
        /// Pause between steps
        #[arg(long, default_value = "0")]
        delay_ms: u64,
        /// Print every frame
        #[arg(long)]
        trace: bool,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// Traverse a graph given as edge pairs
    Traverse {
        /// bfs or dfs
        #[arg(short, long, default_value = "bfs")]
        method: TraversalMethod,
        /// Number of nodes, labelled from 1
        #[arg(short, long)]
        nodes: usize,
        /// Edges such as 1-2,2-3
        #[arg(short, long, default_value = "")]
        edges: String,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
    /// List the available algorithms
    Algorithms,
}

#[derive(Serialize)]
struct SortSummary {
    algorithm: SortAlgorithm,
    input: Vec<i32>,
    output: Vec<i32>,
    steps: usize,
    outcome: SortOutcome,
}

#[derive(Serialize)]
struct TraversalSummary {
    method: TraversalMethod,
    order: Vec<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let target = match (&cli.log_file, &command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Commands::Tui) => LogTarget::Off,
        (None, _) => LogTarget::Stderr,
    };
    logging::init(target, cli.verbose)?;

    match command {
        Commands::Tui => {
            let config = AppConfig::load_or_default(cli.config.as_deref())?;
            run_tui(&config)?;
        }
        Commands::Sort {
            algorithm,
            values,
            size,
            seed,
            delay_ms,
            trace,
            json,
        } => {
            let input = match values {
                Some(values) => values,
                None => {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    ArrayModel::random(size, &mut rng)?.values().to_vec()
                }
            };

            if trace {
                for frame in record(algorithm, &input)? {
                    println!("{}", format_frame(&frame));
                }
            }

            let mut animator = SortAnimator::new(
                ArrayModel::from_values(input.clone()),
                Duration::from_millis(delay_ms),
            );
            animator.start(algorithm, || {})?;
            let report = animator.wait().context("sort thread panicked")?;
            let summary = SortSummary {
                algorithm,
                input,
                output: animator.snapshot().values().to_vec(),
                steps: report.steps,
                outcome: report.outcome,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", algorithm.title());
                println!("  input:  {:?}", summary.input);
                println!("  output: {:?}", summary.output);
                println!("  steps:  {}", summary.steps);
            }
        }
        Commands::Traverse {
            method,
            nodes,
            edges,
            json,
        } => {
            let edges = parse_edges(&edges)?;
            let mut graph = build_graph(nodes, &edges)?;
            let done = TraversalState::start(method, &mut graph)?.run_to_end(&mut graph);
            let summary = TraversalSummary {
                method,
                order: done.order().iter().map(NodeId::label).collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let order: Vec<String> = summary.order.iter().map(ToString::to_string).collect();
                println!("{}: {}", method, order.join(" -> "));
            }
        }
        Commands::Algorithms => {
            println!("Sorting:");
            for alg in SortAlgorithm::ALL {
                println!("  {:<10} {}", alg.name(), alg.title());
            }
            println!("\nTraversal:");
            for method in TraversalMethod::ALL {
                println!("  {}", method.name().to_lowercase());
            }
        }
    }

    Ok(())
}

/// Run `algorithm` synchronously and keep every published frame
fn record(algorithm: SortAlgorithm, input: &[i32]) -> Result<Vec<Frame>> {
    let mut tape = RecordingTape::new(input.to_vec());
    algorithm
        .run(&mut tape)
        .map_err(|_| anyhow!("{algorithm} was cancelled while recording"))?;
    debug!(frames = tape.frames().len(), "trace recorded");
    Ok(tape.frames().to_vec())
}

/// Values on one line; `[v]` marks the current index and `<v>` the next one
fn format_frame(frame: &Frame) -> String {
    frame
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if frame.highlight.current == Some(i) {
                format!("[{v}]")
            } else if frame.highlight.next == Some(i) {
                format!("<{v}>")
            } else {
                format!(" {v} ")
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Parse 1-based pairs such as `1-2,2-3`
fn parse_edges(text: &str) -> Result<Vec<(usize, usize)>> {
    text.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (a, b) = pair
                .split_once('-')
                .ok_or_else(|| anyhow!("edge `{pair}` is not of the form A-B"))?;
            let a: usize = a.trim().parse().with_context(|| format!("bad node in edge `{pair}`"))?;
            let b: usize = b.trim().parse().with_context(|| format!("bad node in edge `{pair}`"))?;
            if a == 0 || b == 0 {
                bail!("edge `{pair}`: nodes are numbered from 1");
            }
            Ok((a, b))
        })
        .collect()
}

/// Nodes in a row, joined by the given 1-based edges
fn build_graph(nodes: usize, edges: &[(usize, usize)]) -> Result<Graph> {
    let mut graph = Graph::new();
    for i in 0..nodes {
        graph.add_node(Point::new(i as f64 * 10.0, 0.0));
    }
    for &(a, b) in edges {
        graph
            .add_edge(NodeId(a - 1), NodeId(b - 1))
            .with_context(|| format!("edge {a}-{b}"))?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Highlight;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_edge_pairs() {
        assert_eq!(parse_edges("1-2, 2-3").unwrap(), vec![(1, 2), (2, 3)]);
        assert!(parse_edges("").unwrap().is_empty());
        assert_eq!(parse_edges("4-4,").unwrap(), vec![(4, 4)]);
    }

    #[test]
    fn rejects_malformed_edges() {
        assert!(parse_edges("1:2").is_err());
        assert!(parse_edges("1-x").is_err());
        assert!(parse_edges("0-1").is_err());
        assert!(parse_edges("1-2-3").is_err());
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let err = build_graph(2, &[(1, 3)]).unwrap_err();
        assert!(err.to_string().contains("1-3"));
    }

    #[test]
    fn traversal_from_the_command_line_shape() {
        let mut graph = build_graph(3, &parse_edges("1-2,2-3").unwrap()).unwrap();
        let done = TraversalState::start(TraversalMethod::Dfs, &mut graph)
            .unwrap()
            .run_to_end(&mut graph);
        let order: Vec<usize> = done.order().iter().map(NodeId::label).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn frames_mark_highlights() {
        let frame = Frame {
            values: vec![5, 3, 8],
            highlight: Highlight::pair(0, 1),
        };
        assert_eq!(format_frame(&frame), "[5]<3> 8 ");
    }

    #[test]
    fn recording_keeps_every_frame() {
        let frames = record(SortAlgorithm::Insertion, &[5, 3, 8, 1]).unwrap();
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| f.values.len() == 4));
    }

    #[test]
    fn cli_parses_sort_arguments() {
        let cli = Cli::try_parse_from([
            "algoviz", "sort", "--algorithm", "merge", "--values", "5,3,8,1", "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Sort { algorithm, values, json, .. }) => {
                assert_eq!(algorithm, SortAlgorithm::Merge);
                assert_eq!(values, Some(vec![5, 3, 8, 1]));
                assert!(json);
            }
            _ => panic!("expected sort"),
        }
    }
}
