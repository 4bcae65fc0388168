use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use dsforest::components::{read_edge_list, ComponentReport};
use dsforest::giant::{compute_connectivity_probability, sample_random_graph, MAX_NODES};
use dsforest::script::run_script;

/// Parse a number that may have metric suffix (k/K=1000, m/M=1e6)
fn parse_metric_number(s: &str) -> Result<usize, String> {
    if s.is_empty() {
        return Err("Empty string".to_string());
    }

    let (num_part, multiplier) = match s.char_indices().last() {
        Some((i, 'k' | 'K')) => (&s[..i], 1_000.0),
        Some((i, 'm' | 'M')) => (&s[..i], 1_000_000.0),
        Some((_, c)) if c.is_ascii_alphabetic() => {
            return Err(format!("Unknown suffix '{c}'. Use k/K (1000) or m/M (1e6)"))
        }
        _ => (s, 1.0),
    };

    let base: f64 = num_part
        .parse()
        .map_err(|e| format!("Invalid number: {e}"))?;
    if base < 0.0 {
        return Err(format!("Value {s} is negative"));
    }

    let result = base * multiplier;
    if result.fract() != 0.0 {
        return Err(format!("Value {s} is not a whole number"));
    }
    if result > usize::MAX as f64 {
        return Err(format!("Value {result} too large"));
    }

    Ok(result as usize)
}

fn parse_node_count(s: &str) -> Result<usize, String> {
    let n = parse_metric_number(s)?;
    if n > MAX_NODES {
        return Err(format!("At most {MAX_NODES} nodes are supported, got {n}"));
    }
    Ok(n)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("Invalid probability: {e}"))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(format!("Probability must be between 0.0 and 1.0, got {p}"));
    }
    Ok(p)
}

/// dsforest - disjoint-set forest toolkit
///
/// Runs union/find scripts, groups labelled edge lists into connected
/// components, and probes random-graph connectivity.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[clap(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a union/find script and echo each command with its result
    Run {
        /// Script file ("-" for stdin)
        #[clap(value_name = "SCRIPT", default_value = "-")]
        script: String,

        /// Output file (stdout if not specified)
        #[clap(short = 'o', long = "output")]
        output: Option<String>,
    },

    /// Group a whitespace-separated edge list into connected components
    Components {
        /// Edge list file ("-" for stdin)
        #[clap(value_name = "EDGES", default_value = "-")]
        edges: String,

        /// Output file (stdout if not specified)
        #[clap(short = 'o', long = "output")]
        output: Option<String>,

        /// Only report components with at least this many members
        #[clap(short = 'm', long = "min-size", default_value = "1")]
        min_size: usize,
    },

    /// Sample an Erdős-Rényi graph and report its components
    Giant {
        /// Number of nodes
        #[clap(short = 'n', long = "nodes", value_parser = parse_node_count)]
        nodes: usize,

        /// Target probability of a single giant component
        #[clap(short = 'c', long = "connectivity", default_value = "0.95", value_parser = parse_probability)]
        connectivity: f64,

        /// Use this edge probability instead of deriving one from --connectivity
        #[clap(short = 'p', long = "edge-prob", value_parser = parse_probability)]
        edge_prob: Option<f64>,

        /// RNG seed for reproducible sampling
        #[clap(short = 's', long = "seed")]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    // RUST_LOG, when set, overrides the command-line level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn open_input(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::BufWriter::new(io::stdout()))),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match args.command {
        Commands::Run { script, output } => {
            let input = open_input(&script)?;
            let mut out = open_output(output.as_deref())?;
            let session = run_script(input, &mut out)
                .with_context(|| format!("Script {script} failed"))?;
            out.flush()?;

            if let Some(forest) = session.forest() {
                log::info!("Final state: {forest}");
            } else {
                log::warn!("Script {script} never declared 'elements'");
            }
        }

        Commands::Components {
            edges,
            output,
            min_size,
        } => {
            let list = read_edge_list(open_input(&edges)?)
                .with_context(|| format!("Failed to read edge list {edges}"))?;
            let report = ComponentReport::build(&list)?;

            let mut out = open_output(output.as_deref())?;
            let written = report.write_tsv(&mut out, &list.labels, min_size)?;
            out.flush()?;

            log::info!(
                "Wrote {written} of {} components (min size {min_size})",
                report.components.len()
            );
        }

        Commands::Giant {
            nodes,
            connectivity,
            edge_prob,
            seed,
        } => {
            let edge_prob =
                edge_prob.unwrap_or_else(|| compute_connectivity_probability(nodes, connectivity));
            log::info!("Sampling G({nodes}, {edge_prob:.4})");

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let summary = sample_random_graph(nodes, edge_prob, &mut rng)?;

            let mut out = open_output(None)?;
            writeln!(out, "edge_prob\t{edge_prob:.6}")?;
            writeln!(out, "{summary}")?;
            out.flush()?;
        }
    }

    Ok(())
}
