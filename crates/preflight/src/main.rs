//! Preflight CLI - Content dependency checks from the command line.
//!
//! Preflight builds a bounded dependency graph for a content asset from a
//! registry snapshot, flags editor-only content in shippable references, and
//! renders reports, trees, paths, and cycles.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use preflight::config::Config;
use preflight::report::ReportStatus;

mod cli;

use cli::analyze::ReportFormat;

/// Preflight: dependency analysis and shipping checks for content assets.
#[derive(Parser)]
#[command(name = "preflight")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by every graph-building command.
#[derive(Args)]
struct GraphArgs {
    /// Root asset path (object path, export text, or package name)
    root: String,

    /// Registry snapshot JSON file to read dependencies from
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Maximum traversal depth (overrides .preflight.yaml)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of packages to visit (overrides .preflight.yaml)
    #[arg(long)]
    max_nodes: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a root asset and render a preflight report
    Analyze {
        #[command(flatten)]
        graph: GraphArgs,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the dependency tree of a root asset
    Tree {
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Explain how a package is first reached from the root
    Explain {
        #[command(flatten)]
        graph: GraphArgs,

        /// Package to explain
        target: String,
    },

    /// List reference cycles reachable from the root
    Cycles {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = Config::discover(&cwd)?;

    match command {
        Commands::Analyze {
            graph,
            format,
            output,
        } => {
            let options = config.build_options(graph.max_depth, graph.max_nodes);
            let status = cli::analyze::run(
                &graph.root,
                &graph.snapshot,
                &options,
                format,
                output.as_deref(),
            )?;
            Ok(if status == ReportStatus::Fail {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Tree { graph } => {
            let options = config.build_options(graph.max_depth, graph.max_nodes);
            cli::tree::run(&graph.root, &graph.snapshot, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Explain { graph, target } => {
            let options = config.build_options(graph.max_depth, graph.max_nodes);
            cli::explain::run(&graph.root, &target, &graph.snapshot, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Cycles { graph } => {
            let options = config.build_options(graph.max_depth, graph.max_nodes);
            cli::cycles::run(&graph.root, &graph.snapshot, &options)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
