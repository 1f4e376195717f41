mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dealrank",
    version,
    about = "Rank vendor deals for the weekly ad from vendor spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the vendor layout and header row of a spreadsheet
    Detect {
        /// Path to an XLSX, XLS, ODS or CSV file
        input_file: PathBuf,
    },
    /// Parse a vendor spreadsheet into canonical deals (without scoring)
    Parse {
        /// Path to an XLSX, XLS, ODS or CSV file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Score one week of deals from spreadsheets or pre-parsed JSON
    Score {
        /// Vendor spreadsheets and/or JSON deal lists
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Pipeline config file (weights, quality thresholds, parsing)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Weight preset: balanced, margin-first, traffic (overrides config weights)
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Date to score against, YYYY-MM-DD (default: today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show component scores, multipliers and every reason
        #[arg(long)]
        verbose: bool,
    },
    /// Inspect and validate scoring weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },
}

#[derive(Subcommand)]
enum WeightsAction {
    /// List built-in weight presets
    List,
    /// Show the weights of a preset
    Show {
        /// Preset name (e.g., "balanced")
        preset: String,
    },
    /// Validate a pipeline config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect { input_file } => commands::detect::run(input_file),
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Score {
            input_files,
            config,
            preset,
            as_of,
            output,
            verbose,
        } => commands::score::run(input_files, config, preset, as_of, &output, verbose),
        Commands::Weights { action } => match action {
            WeightsAction::List => commands::weights::list(),
            WeightsAction::Show { preset } => commands::weights::show(&preset),
            WeightsAction::Validate { file } => commands::weights::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
