use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pdp_tracker::cli::{baseline, compare, export, import, list, report, top};
use pdp_tracker::config::Config;
use pdp_tracker::store::SnapshotStore;

#[derive(Parser)]
#[command(name = "pdp")]
#[command(about = "Post-dated payment baseline tracking and improvement analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "pdp.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a report export into a baseline
    Import {
        /// Report file (CSV export)
        file: Option<PathBuf>,

        /// Import every report export found in this directory
        #[arg(long, conflicts_with = "file")]
        dir: Option<PathBuf>,

        /// Existing baseline to import into (replaces its data);
        /// a new baseline is created when omitted
        #[arg(short, long, conflicts_with = "dir")]
        baseline: Option<i64>,
    },

    /// List baselines
    List,

    /// Print the progress report for a baseline
    Report {
        /// Baseline id (defaults to the most recent)
        #[arg(short, long)]
        baseline: Option<i64>,
    },

    /// Compare two baselines
    Compare {
        /// Starting-point baseline id
        baseline1: i64,

        /// Current baseline id
        baseline2: i64,

        /// Emit the structured comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show top agents by total promised
    Top {
        /// Baseline id (defaults to the most recent)
        #[arg(short, long)]
        baseline: Option<i64>,

        /// Number of agents to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,
    },

    /// Export chart datasets as JSON for visualization tools
    Export {
        /// Baseline id (defaults to the most recent)
        #[arg(short, long)]
        baseline: Option<i64>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Baseline management
    Baseline {
        #[command(subcommand)]
        command: BaselineCommands,
    },
}

#[derive(Subcommand)]
enum BaselineCommands {
    /// Create a new baseline
    Create {
        /// Baseline name
        name: String,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = Config::load(&cli.config).unwrap_or_default();

    // Initialize store
    let mut store = SnapshotStore::open(&config.database_path())?;

    match cli.command {
        Commands::Import {
            file,
            dir,
            baseline,
        } => match (file, dir) {
            (Some(file), _) => {
                import::run(&mut store, &config, &file, baseline)?;
            }
            (None, Some(dir)) => {
                import::run_dir(&mut store, &config, &dir)?;
            }
            (None, None) => {
                anyhow::bail!("provide a report file or --dir <path>");
            }
        },
        Commands::List => {
            list::run(&store)?;
        }
        Commands::Report { baseline } => {
            report::run(&store, baseline)?;
        }
        Commands::Compare {
            baseline1,
            baseline2,
            json,
        } => {
            compare::run(&store, baseline1, baseline2, json)?;
        }
        Commands::Top { baseline, limit } => {
            top::run(&store, baseline, limit)?;
        }
        Commands::Export { baseline, out } => {
            export::run(&store, baseline, out.as_deref())?;
        }
        Commands::Baseline { command } => match command {
            BaselineCommands::Create { name, description } => {
                baseline::create(&store, &name, &description)?;
            }
        },
    }

    Ok(())
}
