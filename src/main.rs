use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use itertools::Itertools;
use log::debug;
use plexorank::{RankConfig, Ranker};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Generate and manipulate lexicographic rank keys
#[derive(Parser, Debug)]
#[command(name = "rk", version, about)]
struct Cli {
    /// Read the configuration from this file instead of the default locations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a rank between two ranks
    Between { prev: String, next: String },
    /// Print a rank after a rank
    After {
        rank: String,
        /// Digit position to step, counted from the last character
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Print a rank before a rank
    Before {
        rank: String,
        /// Digit position to step, counted from the last character
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Print a rank for a slot between optional neighbours
    Place {
        /// Rank of the element before the slot
        #[arg(short, long)]
        after: Option<String>,
        /// Rank of the element after the slot
        #[arg(short, long)]
        before: Option<String>,
    },
    /// Print evenly spaced ranks to seed a collection
    Bulk {
        count: usize,
        #[arg(short, long, default_value = " ")]
        separator: String,
    },
    /// Compare two ranks
    Compare { a: String, b: String },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => RankConfig::from_path(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => RankConfig::from_config()?,
    };
    let ranker = Ranker::new(&config)?;
    debug!("ranks written with alphabet {}", ranker.table());

    match cli.command {
        Commands::Between { prev, next } => {
            println!("{}", ranker.mean(&prev, &next)?);
        }
        Commands::After { rank, depth } => {
            let depth = depth.unwrap_or(ranker.depth());
            println!("{}", ranker.increment_at_depth(&rank, depth)?);
        }
        Commands::Before { rank, depth } => {
            let depth = depth.unwrap_or(ranker.depth());
            println!("{}", ranker.decrement_at_depth(&rank, depth)?);
        }
        Commands::Place { after, before } => {
            println!("{}", ranker.place(after.as_deref(), before.as_deref())?);
        }
        Commands::Bulk { count, separator } => {
            println!("{}", ranker.create_bulk_ranks(count)?.iter().join(&separator));
        }
        Commands::Compare { a, b } => {
            let ordering = match ranker.compare(&a, &b)? {
                Ordering::Less => "less",
                Ordering::Equal => "equal",
                Ordering::Greater => "greater",
            };
            println!("{ordering}");
        }
    }

    Ok(())
}
