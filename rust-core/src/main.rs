use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use brillouin_zone::interfaces::{EdgeMode, ReciprocalConvention, ShellStrategy, Space};
use brillouin_zone::lattice::{
    body_centered_cubic_lattice, face_centered_cubic_lattice, hexagonal_lattice, simple_cubic_lattice,
    LatticeMatrix,
};
use brillouin_zone::symmetries::HighSymmetryData;
use brillouin_zone::{compute_brillouin_zone, BrillouinZoneConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "bz")]
#[command(about = "Construct the first Brillouin zone of a crystal lattice")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the zone for a lattice read from a JSON request
    Compute {
        /// Request file: {"lattice": [[..],[..],[..]], "kpoints": {..}, "path": [[..,..]], "config": {..}}
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        options: ZoneOptions,
    },
    /// Compute the zone of a built-in lattice
    Demo {
        #[arg(value_enum)]
        lattice: DemoLattice,

        /// Lattice parameter a
        #[arg(short, long, default_value = "1.0")]
        a: f64,

        /// Height c (hexagonal only)
        #[arg(short, long, default_value = "1.633")]
        c: f64,

        #[command(flatten)]
        options: ZoneOptions,
    },
}

#[derive(Args)]
struct ZoneOptions {
    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merge coplanar hull triangles and report only true polyhedron edges
    #[arg(long)]
    polygonal: bool,

    /// Grow the neighbor shell until the zone is verified (up to --max-shell)
    #[arg(long)]
    adaptive: bool,

    /// Largest shell tried by --adaptive
    #[arg(long, default_value = "3")]
    max_shell: usize,

    /// Use aᵢ·bⱼ = δᵢⱼ instead of 2π·δᵢⱼ
    #[arg(long)]
    unit_convention: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoLattice {
    Sc,
    Bcc,
    Fcc,
    Hex,
}

#[derive(Deserialize)]
struct ZoneRequest {
    lattice: [[f64; 3]; 3],
    #[serde(flatten)]
    annotations: HighSymmetryData,
    #[serde(default)]
    config: BrillouinZoneConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting bz v{}", brillouin_zone::VERSION);

    match cli.command {
        Commands::Compute { input, options } => {
            info!("Computing Brillouin zone for {}", input.display());
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read request {}", input.display()))?;
            let request: ZoneRequest = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse request {}", input.display()))?;
            let lattice = LatticeMatrix::from_array(request.lattice, Space::Real)
                .context("Invalid lattice")?;
            let config = options.apply(request.config);
            run(&lattice, request.annotations, &config, &options)
        }
        Commands::Demo {
            lattice,
            a,
            c,
            options,
        } => {
            let lattice = match lattice {
                DemoLattice::Sc => simple_cubic_lattice(a),
                DemoLattice::Bcc => body_centered_cubic_lattice(a),
                DemoLattice::Fcc => face_centered_cubic_lattice(a),
                DemoLattice::Hex => hexagonal_lattice(a, c),
            }
            .context("Invalid demo lattice parameters")?;
            let config = options.apply(BrillouinZoneConfig::default());
            run(&lattice, HighSymmetryData::new(), &config, &options)
        }
    }
}

impl ZoneOptions {
    // Flags only ever switch away from the defaults; a request's config is kept otherwise
    fn apply(&self, mut config: BrillouinZoneConfig) -> BrillouinZoneConfig {
        if self.polygonal {
            config.edges = EdgeMode::Polygonal;
        }
        if self.adaptive {
            config.shell = ShellStrategy::Adaptive {
                max_shell: self.max_shell,
            };
        }
        if self.unit_convention {
            config.convention = ReciprocalConvention::Unit;
        }
        config
    }
}

fn run(
    lattice: &LatticeMatrix,
    annotations: HighSymmetryData,
    config: &BrillouinZoneConfig,
    options: &ZoneOptions,
) -> Result<()> {
    debug!("Configuration: {:?}", config);
    let zone = compute_brillouin_zone(lattice, annotations, config)
        .context("Brillouin zone construction failed")?;

    let json = if options.pretty {
        serde_json::to_string_pretty(&zone)?
    } else {
        serde_json::to_string(&zone)?
    };

    match &options.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} vertices and {} edges to {}", zone.vertices.len(), zone.edges.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
