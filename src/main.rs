use clap::Parser;
use cview_geometry::utils::logger;
use cview_geometry::{calculate_scene, EngineConfig, Structure};
use log::{error, info, LevelFilter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cview-geometry")]
#[command(about = "Builds a render model (atoms, bonds, unit cell, framing) from a crystal structure record")]
#[command(version)]
struct Cli {
    /// Structure record (JSON)
    input: PathBuf,

    /// Engine settings (JSON). Defaults to the user config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the render model here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load(),
    };

    let json = std::fs::read_to_string(&cli.input)?;
    let structure = Structure::from_json(&json)?;
    info!(
        "Loaded {} sites from {:?}",
        structure.sites.len(),
        cli.input
    );

    let model = calculate_scene(&structure, &config)?;
    info!(
        "Render model: {} atoms, {} bonds, {} warnings",
        model.atoms.len(),
        model.bonds.len(),
        model.warnings.len()
    );

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if cli.compact {
        serde_json::to_writer(&mut out, &model)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &model)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Could not install logger: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
