//! trxr - Command-line tool for reading TRX test reports

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use trx_reader::commands::*;
use trx_reader::config::ReaderConfig;
use trx_reader::error::Result;
use trx_reader::ui::CliUI;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "trxr")]
#[command(about = "Read .NET TRX test reports", long_about = None)]
struct Cli {
    /// Configuration file (defaults to .trxr.conf in the current directory)
    #[arg(short = 'c', long, global = true, env = "TRXR_CONFIG")]
    config: Option<PathBuf>,

    /// Log parsing details to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every result
    Read {
        /// TRX files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Only show tests whose name matches this regex
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show failing tests
    Failing {
        /// TRX files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// List test names only, one per line (for scripting)
        #[arg(long)]
        list: bool,
    },

    /// Show the slowest tests
    Slowest {
        /// TRX files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Number of tests to show
        #[arg(short = 'n', long, default_value = "10", conflicts_with = "all")]
        count: usize,

        /// Show all tests (not just top N)
        #[arg(long)]
        all: bool,
    },

    /// Show result statistics
    Stats {
        /// TRX files or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let config = ReaderConfig::discover(cli.config.as_deref(), &std::env::current_dir()?)?;
    let mut ui = CliUI::new();

    match cli.command {
        Commands::Read { paths, filter } => {
            let cmd = ReadCommand::with_filter(paths, config, filter);
            cmd.execute(&mut ui)
        }
        Commands::Failing { paths, list } => {
            let cmd = if list {
                FailingCommand::with_list_only(paths, config)
            } else {
                FailingCommand::new(paths, config)
            };
            cmd.execute(&mut ui)
        }
        Commands::Slowest { paths, count, all } => {
            let display_count = if all { usize::MAX } else { count };
            let cmd = SlowestCommand::with_count(paths, config, display_count);
            cmd.execute(&mut ui)
        }
        Commands::Stats { paths } => {
            let cmd = StatsCommand::new(paths, config);
            cmd.execute(&mut ui)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {}", e);
            std::process::exit(1);
        }
    }
}
