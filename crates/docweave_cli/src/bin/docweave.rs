//! docweave CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docweave_cli::commands::{self, PathFilter};
use docweave_cli::WorkspaceConfig;
use docweave_foundation::Error;
use docweave_metadata::LoadConfig;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "DOCWEAVE_LOG";

/// Compile persistence, serialization and validation metadata into one schema.
#[derive(Parser, Debug)]
#[command(name = "docweave", version)]
struct Cli {
    /// Workspace directory or configuration file
    #[arg(short = 'C', long, value_name = "PATH", default_value = ".")]
    workspace: PathBuf,

    /// Skip orphaned descriptors and let later declarations win
    #[arg(long)]
    lenient: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the graph and report counts
    Check,
    /// Print one document
    Show {
        /// Entity name
        entity: String,
    },
    /// Print every document as JSON
    Dump,
    /// List dotted field paths reachable from a document
    Paths {
        /// Entity name
        entity: String,
        /// Only read-only fields
        #[arg(long, conflicts_with_all = ["searchable", "required", "type_name"])]
        read_only: bool,
        /// Only searchable fields
        #[arg(long, conflicts_with_all = ["required", "type_name"])]
        searchable: bool,
        /// Only required fields
        #[arg(long, conflicts_with = "type_name")]
        required: bool,
        /// Only fields of this scalar or element type
        #[arg(long = "type", value_name = "TYPE")]
        type_name: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String, Error> {
    let mut config = WorkspaceConfig::locate(&cli.workspace)?;
    if cli.lenient {
        config = config.with_load(LoadConfig::lenient());
    }
    let graph = config.build_graph()?;

    match cli.command {
        Command::Check => Ok(format!("{}\n", commands::check(&graph))),
        Command::Show { entity } => commands::show(&graph, &entity),
        Command::Dump => commands::dump(&graph).map(|json| format!("{json}\n")),
        Command::Paths {
            entity,
            read_only,
            searchable,
            required,
            type_name,
        } => {
            let filter = if read_only {
                PathFilter::ReadOnly
            } else if searchable {
                PathFilter::Searchable
            } else if required {
                PathFilter::Required
            } else {
                type_name.map_or(PathFilter::All, PathFilter::Type)
            };
            commands::paths(&graph, &entity, &filter)
        }
    }
}

fn report(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
    if let Some(context) = &error.context {
        eprintln!("{context}");
    }
}
