use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Benchmark console for a containerized analytical SQL engine.
#[derive(Parser, Debug)]
#[command(name = "querybench")]
#[command(version)]
#[command(about = "Run timed SQL queries against the engine's CLI client", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML); built-in defaults when omitted
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Per-query timeout in seconds (overrides the config file)
    #[arg(long = "timeout", value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Filter: exact street name
    #[arg(long = "street", global = true)]
    pub street: Option<String>,

    /// Filter: exact vehicle make
    #[arg(long = "vehicle-make", global = true)]
    pub vehicle_make: Option<String>,

    /// Filter: fine amount lower bound (requires --amount-max)
    #[arg(long = "amount-min", requires = "amount_max", global = true)]
    pub amount_min: Option<f64>,

    /// Filter: fine amount upper bound (requires --amount-min)
    #[arg(long = "amount-max", requires = "amount_min", global = true)]
    pub amount_max: Option<f64>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List the built-in benchmark queries and sample queries
    List,
    /// Run one or more benchmark queries by id, with filters applied
    Run {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
    /// Execute a free-form SQL query
    Exec {
        sql: String,
        /// Append the active filters to the query's WHERE clause
        #[arg(long = "apply-filters")]
        apply_filters: bool,
    },
    /// Run the whole benchmark catalog and print a timing summary
    Bench,
    /// Check that the engine answers a trivial query
    Ping,
    /// Print container runtime diagnostics
    Diag,
}
