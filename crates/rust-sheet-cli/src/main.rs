//! rsheet - command-line front-end for the rust-sheet engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_sheet_bridge::{
    parse_location, reconcile_edit, EngineConfig, Position, ProcessTransport, ProtocolClient,
    Reconciled, SheetModel, Snapshot,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "rsheet")]
#[command(author, version, about = "Command-line front-end for the rust-sheet engine")]
struct Cli {
    /// Engine executable
    #[arg(long, env = "RSHEET_ENGINE", default_value = "rsheet-engine")]
    engine: PathBuf,

    /// Extra argument passed to the engine before the subcommand (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Directory to run the engine in (it keeps its sheet file there)
    #[arg(long, env = "RSHEET_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the sheet and print it
    Show {
        /// Print the snapshot as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Remove every cell
    Clear,

    /// Append an empty column
    AddCol,

    /// Append an empty row
    AddRow,

    /// Trim trailing empty rows and columns
    Shrink,

    /// Print the raw value stored in a cell (formulas unevaluated)
    ReadCell {
        /// Cell location, e.g. B12
        location: String,
    },

    /// Remove the value stored in a cell
    Delete {
        /// Cell location, e.g. B12
        location: String,
    },

    /// Set a cell's text, writing it to the engine only if it changed
    Edit {
        /// Cell location, e.g. B12
        location: String,

        /// New cell text
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = EngineConfig {
        executable: cli.engine,
        leading_args: cli.engine_args,
        working_dir: cli.dir,
        env: Vec::new(),
    };
    tracing::debug!(engine = %config.executable.display(), "Using engine");
    let client = ProtocolClient::new(ProcessTransport::new(config))
        .with_sink(|source: &str, line: &str| eprintln!("[{source}] {line}"));
    let mut model = SheetModel::new(client);

    match cli.command {
        Commands::Show { json } => {
            let snapshot = model.read_sheet().context("Failed to read sheet")?;
            if json {
                println!("{}", serde_json::to_string_pretty(snapshot)?);
            } else {
                print_grid(snapshot);
            }
        }
        Commands::Clear => print_grid(model.clear_sheet().context("Failed to clear sheet")?),
        Commands::AddCol => print_grid(model.add_column().context("Failed to add column")?),
        Commands::AddRow => print_grid(model.add_row().context("Failed to add row")?),
        Commands::Shrink => print_grid(model.shrink().context("Failed to shrink sheet")?),
        Commands::ReadCell { location } => {
            let pos = parse_location(&location)?;
            let value = model
                .read_cell(pos)
                .with_context(|| format!("Failed to read {pos}"))?;
            match value {
                Some(value) => println!("{pos} = {value} ({})", value.type_name()),
                None => println!("{pos} is empty"),
            }
        }
        Commands::Delete { location } => {
            let pos = parse_location(&location)?;
            let snapshot = model
                .delete_cell(pos)
                .with_context(|| format!("Failed to delete {pos}"))?;
            print_grid(snapshot);
        }
        Commands::Edit { location, text } => edit(&mut model, &location, &text)?,
    }

    Ok(())
}

fn edit(model: &mut SheetModel<ProcessTransport>, location: &str, text: &str) -> Result<()> {
    let pos: Position = parse_location(location)?;
    model.read_sheet().context("Failed to read sheet")?;

    let mut display = |pos: Position, text: &str| println!("{pos} = {text}");
    let outcome = reconcile_edit(model, pos, text, &mut display)
        .with_context(|| format!("Failed to write {pos}"))?;

    if outcome == Reconciled::Unchanged {
        eprintln!("{pos} unchanged");
    }
    print_grid(model.snapshot());
    Ok(())
}

fn print_grid(snapshot: &Snapshot) {
    print!("{}", render::render_grid(snapshot));
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
