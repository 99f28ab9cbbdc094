//! optionpricer CLI - price options from TOML request files
//!
//! # Commands
//!
//! - `optionpricer price <request.toml>` - price the instrument in the request
//! - `optionpricer implied-vol <request.toml>` - implied volatility of `market_price`
//! - `optionpricer greeks <request.toml> [--profile]` - finite-difference Greeks
//!
//! A request names its unit convention, the option direction, the market and
//! the instrument:
//!
//! ```toml
//! units = "percent"
//! direction = "call"
//!
//! [market]
//! spot = 100.0
//! strike = 100.0
//! maturity = 1.0
//! rate = 5.0
//! volatility = 20.0
//!
//! [instrument]
//! kind = "arithmetic_asian"
//! observations = 12
//! paths = 50000
//! use_control_variate = true
//! ```
//!
//! Logs go to stderr and follow `RUST_LOG`; `--verbose` raises the default
//! level to debug.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod report;
mod request;

/// Option pricing engine CLI
#[derive(Debug, Parser)]
#[command(name = "optionpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pricing configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price the instrument described in a request file
    Price {
        /// Path to the request file
        request: PathBuf,

        /// Override the configured seed
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Solve for the volatility reproducing the request's `market_price`
    ImpliedVol {
        /// Path to the request file
        request: PathBuf,
    },

    /// Finite-difference Greeks of the instrument in a request file
    Greeks {
        /// Path to the request file
        request: PathBuf,

        /// Evaluate over 70 % to 130 % of spot instead of at spot only
        #[arg(short, long)]
        profile: bool,

        /// Intervals of the profile spot grid
        #[arg(long, default_value_t = 50)]
        steps: usize,
    },
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Price { request, seed } => {
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            commands::price::run(&request, &config, cli.format)
        }
        Commands::ImpliedVol { request } => {
            commands::implied_vol::run(&request, &config, cli.format)
        }
        Commands::Greeks {
            request,
            profile,
            steps,
        } => commands::greeks::run(&request, &config, profile.then_some(steps), cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "optionpricer",
            "greeks",
            "req.toml",
            "--profile",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Greeks { profile, steps, .. } => {
                assert!(profile);
                assert_eq!(steps, 50);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["optionpricer", "price", "r.toml", "-f", "csv"]).is_err());
    }
}
