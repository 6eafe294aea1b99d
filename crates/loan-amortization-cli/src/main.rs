mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;

/// Fixed-rate loan payments and amortization schedules
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Fixed-rate loan payments and amortization schedules",
    long_about = "A CLI for computing fixed monthly loan payments and month-by-month \
                  amortization schedules with decimal precision. Supports a constant \
                  extra monthly payment and compares standard against accelerated payoff."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed monthly payment
    Payment(LoanArgs),
    /// Build the month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Compare standard payoff against payoff with an extra payment
    Compare(LoanArgs),
    /// Check loan inputs without computing anything
    Validate(LoanArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Validate(args) => commands::loan::run_validate(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
