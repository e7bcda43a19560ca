use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ef_core::BlockId;
use ef_diagram::{Diagram, DiagramSpec};
use tracing::info;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "ef-cli")]
#[command(about = "Edgeflow CLI - data flow diagram evaluation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate diagram spec syntax and wiring
    Validate {
        /// Path to the diagram spec JSON file
        diagram_path: PathBuf,
    },
    /// List the blocks in a diagram
    Blocks {
        /// Path to the diagram spec JSON file
        diagram_path: PathBuf,
    },
    /// Run evaluation ticks and print the output map
    Run {
        /// Path to the diagram spec JSON file
        diagram_path: PathBuf,
        /// Number of ticks to evaluate
        #[arg(long, default_value_t = 1)]
        ticks: u32,
        /// Inject a leaf value before the first tick, as id=literal
        #[arg(long = "set", value_name = "ID=VALUE")]
        sets: Vec<String>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { diagram_path } => cmd_validate(&diagram_path),
        Commands::Blocks { diagram_path } => cmd_blocks(&diagram_path),
        Commands::Run {
            diagram_path,
            ticks,
            sets,
        } => cmd_run(&diagram_path, ticks, &sets),
    }
}

fn load_diagram(path: &Path) -> CliResult<Diagram> {
    let text = fs::read_to_string(path)?;
    let spec: DiagramSpec = serde_json::from_str(&text)?;
    let diagram = Diagram::from_spec(&spec)?;
    info!(path = %path.display(), name = %diagram.name, "diagram loaded");
    Ok(diagram)
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    let diagram = load_diagram(path)?;
    println!(
        "diagram '{}' is valid ({} blocks)",
        diagram.name,
        diagram.blocks().len()
    );
    Ok(())
}

fn cmd_blocks(path: &Path) -> CliResult<()> {
    let diagram = load_diagram(path)?;
    println!("diagram '{}':", diagram.name);
    for block in diagram.blocks() {
        let role = if block.is_leaf() {
            "leaf"
        } else if block.is_sink() {
            "sink"
        } else {
            "filter"
        };
        println!(
            "  {:>4}  {:<24} {:<24} {}",
            block.id, block.name, block.type_tag, role
        );
    }
    Ok(())
}

fn cmd_run(path: &Path, ticks: u32, sets: &[String]) -> CliResult<()> {
    let mut diagram = load_diagram(path)?;

    for set in sets {
        let (id, literal) = parse_set(set)?;
        diagram.inject_literal(id, literal)?;
    }

    for tick in 1..=ticks {
        diagram.update();
        println!("tick {tick}:");
        for (id, value) in diagram.outputs() {
            match value {
                Some(v) => println!("  {id} = {v}"),
                None => println!("  {id} = null"),
            }
        }
    }
    Ok(())
}

fn parse_set(set: &str) -> CliResult<(BlockId, &str)> {
    let (id, literal) = set
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got {set:?}"))?;
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|_| format!("block id must be an integer, got {id:?}"))?;
    Ok((BlockId::new(id), literal.trim()))
}
