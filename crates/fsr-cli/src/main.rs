use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fsr")]
#[command(about = "Fuel station tank reconciliation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile one shift submission against the station config
    Reconcile {
        /// Layered config paths in merge order (falls back to FSR_CONFIG)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Submission JSON file
        #[arg(long)]
        input: String,

        /// Record JSON of the previous period (seeds opening + cumulative totals)
        #[arg(long)]
        previous: Option<String>,

        /// Record JSON this submission corrects
        #[arg(long)]
        supersedes: Option<String>,

        /// Write the resulting record as JSON here
        #[arg(long)]
        out: Option<String>,

        /// Fail on config keys nothing reads
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Convert a dip to a volume (or back) on one tank's chart
    Dip {
        /// Layered config paths in merge order (falls back to FSR_CONFIG)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Tank id (e.g. T1)
        #[arg(long)]
        tank: String,

        /// Dip height in cm
        #[arg(long, conflicts_with = "volume", required_unless_present = "volume")]
        dip: Option<f64>,

        /// Volume in liters
        #[arg(long)]
        volume: Option<f64>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (defaults -> station overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the effective thresholds after layering
    Thresholds {
        /// Layered config paths in merge order (falls back to FSR_CONFIG)
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Silent if the file does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Reconcile {
            config_paths,
            input,
            previous,
            supersedes,
            out,
            strict,
        } => commands::reconcile::run_reconcile(commands::reconcile::ReconcileArgs {
            config_paths,
            input,
            previous,
            supersedes,
            out,
            strict,
        })?,

        Commands::Dip {
            config_paths,
            tank,
            dip,
            volume,
        } => commands::dip::run_dip(config_paths, &tank, dip, volume)?,

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = fsr_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Thresholds { config_paths } => commands::run_thresholds(config_paths)?,
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
