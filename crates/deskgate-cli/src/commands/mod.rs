//! CLI command definitions and dispatch.

pub mod config;
pub mod policy;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use deskgate_core::config::AppConfig;
use deskgate_core::AppResult;

/// DeskGate — credential issuance and role policy for managed workspaces
#[derive(Debug, Parser)]
#[command(name = "deskgate", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to config/default + DESKGATE_ENV overlay)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue, validate, and refresh tokens
    Token(token::TokenArgs),
    /// Query role grants
    Policy(policy::PolicyArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command completed.
    Done,
    /// A policy query answered "not authorized".
    Denied,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: &AppConfig) -> AppResult<Outcome> {
        match &self.command {
            Commands::Token(args) => token::execute(args, config, self.format),
            Commands::Policy(args) => policy::execute(args, config, self.format),
            Commands::Config(args) => config::execute(args, config, self.format),
        }
    }
}

/// Helper: load configuration from an explicit file or the environment layers
pub fn load_config(config_path: Option<&str>) -> AppResult<AppConfig> {
    match config_path {
        Some(path) => AppConfig::load_from(path),
        None => {
            let env = std::env::var("DESKGATE_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}
