mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::amortize::AmortizeArgs;
use mortgage_calc_core::CalcError;

/// Fixed-rate loan amortization calculator
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Fixed-rate loan amortization calculator",
    long_about = "Computes the level monthly payment, the payoff timeline with \
                  optional extra principal, and a month-by-month schedule of \
                  interest, principal and remaining balance."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Schedule rows shown in table output (0 = all)
    #[arg(long, default_value_t = 0, global = true)]
    rows: usize,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an amortization schedule for a fixed-rate loan
    Amortize(AmortizeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::amortize::run_amortize(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, cli.rows);
            process::exit(0);
        }
        Err(e) => {
            match e.downcast_ref::<CalcError>() {
                Some(CalcError::Validation { details }) => {
                    eprintln!("{}: Invalid input", "error".red().bold());
                    for detail in details {
                        eprintln!("  - {}", detail);
                    }
                }
                _ => eprintln!("{}: {}", "error".red().bold(), e),
            }
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
