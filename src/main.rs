//! Compute an approximate Steiner tree for a graph in the PACE format, or for the built-in
//! reference graph if no file is given.
//! Results go to stdout, log messages to stderr.

use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use steiner_sph::{
    shortest_path_heuristic, GenericResult, Instance, Options, SteinerTree, TerminalSelection,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Instance in the PACE 2018 Steiner tree format. Uses the reference graph if omitted.
    file: Option<PathBuf>,

    /// How to pick the next terminal in every round.
    #[arg(long, value_enum, default_value_t = Selection::Nearest)]
    selection: Selection,

    /// Evaluate candidate sources on a single thread.
    #[arg(long)]
    serial: bool,

    #[arg(long, value_enum, default_value_t = Format::Report)]
    format: Format,

    /// Write the result to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Selection {
    Nearest,
    LastSource,
}

impl From<Selection> for TerminalSelection {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Nearest => TerminalSelection::NearestToTree,
            Selection::LastSource => TerminalSelection::LastSource,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human readable list of vertices, edges and the total cost.
    Report,
    /// PACE solution format.
    Ost,
}

fn main() -> GenericResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    // File instances are 1-based, the reference graph is labelled as written.
    let (instance, label_offset) = match &args.file {
        Some(path) => {
            info!(path = %path.display(), "reading graph");
            (fs::read_to_string(path)?.parse::<Instance>()?, 1)
        }
        None => {
            info!("no input file, using the reference graph");
            (Instance::reference(), 0)
        }
    };
    info!(
        nodes = instance.graph.num_nodes(),
        edges = instance.graph.edges().count(),
        terminals = instance.terminals.len(),
        "instance loaded"
    );

    let options = Options {
        selection: args.selection.into(),
        parallel: !args.serial,
    };
    let before = Instant::now();
    let tree = shortest_path_heuristic(&instance.graph, &instance.terminals, &options)?;
    info!(
        cost = tree.total_cost(),
        elapsed = ?before.elapsed(),
        "heuristic finished"
    );

    match &args.output {
        Some(path) => write_tree(&tree, args.format, label_offset, &mut File::create(path)?)?,
        None => write_tree(&tree, args.format, label_offset, &mut io::stdout().lock())?,
    }
    Ok(())
}

fn write_tree<W: Write>(
    tree: &SteinerTree,
    format: Format,
    label_offset: usize,
    out: &mut W,
) -> io::Result<()> {
    match format {
        Format::Report => tree.write_report(out, label_offset),
        Format::Ost => tree.write_ost(out),
    }
}
