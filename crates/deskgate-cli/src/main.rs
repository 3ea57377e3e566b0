//! DeskGate CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod output;

use commands::{Cli, Outcome};
use deskgate_core::config::AppConfig;

fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match cli.execute(&config) {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Denied) => std::process::exit(2),
        Err(e) => {
            if e.is_authentication() {
                output::print_error(&format!("Not authenticated: {}", e.message));
            } else {
                output::print_error(&e.to_string());
            }
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging; `RUST_LOG` overrides the configured level
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
