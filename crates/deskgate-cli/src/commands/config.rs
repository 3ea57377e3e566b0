//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use deskgate_auth::{CredentialIssuer, PolicyTables};
use deskgate_core::config::AppConfig;
use deskgate_core::AppResult;

use super::Outcome;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secret redacted)
    Show,
    /// Check that the signing secret and grant tables are usable
    Validate,
}

const REDACTED: &str = "[REDACTED]";

/// Result of `config validate`
#[derive(Debug, Serialize)]
struct ValidationSummary {
    valid: bool,
    grant_tables: &'static str,
    roles: usize,
    placeholder_secret: bool,
}

fn tables_source(config: &AppConfig) -> &'static str {
    if config.policy.is_builtin() { "built-in" } else { "configured" }
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<Outcome> {
    match &args.command {
        ConfigCommand::Show => {
            let mut redacted = config.clone();
            redacted.auth.jwt_secret = REDACTED.to_string();

            let mut fields = vec![
                ("JWT secret", REDACTED.to_string()),
                ("Access TTL", format!("{} min", config.auth.jwt_access_ttl_minutes)),
                ("Refresh TTL", format!("{} h", config.auth.jwt_refresh_ttl_hours)),
                ("Clock skew", format!("{} s", config.auth.clock_skew_leeway_seconds)),
                ("Grant tables", tables_source(config).to_string()),
                ("Log level", config.logging.level.clone()),
                ("Log format", config.logging.format.clone()),
            ];
            for (role, grants) in &config.policy.roles {
                let grant_counts = format!(
                    "{role} ({} permissions, {} bundles)",
                    grants.permissions.len(),
                    grants.bundles.len()
                );
                fields.push(("Override", grant_counts));
            }
            output::print_details(&redacted, &fields, format);
        }
        ConfigCommand::Validate => {
            CredentialIssuer::new(&config.auth)?;
            let tables = PolicyTables::from_config(&config.policy)?;
            let placeholder = config.auth.uses_placeholder_secret();

            let summary = ValidationSummary {
                valid: true,
                grant_tables: tables_source(config),
                roles: tables.roles().len(),
                placeholder_secret: placeholder,
            };
            let fields = [
                ("Access TTL", format!("{} min", config.auth.jwt_access_ttl_minutes)),
                ("Refresh TTL", format!("{} h", config.auth.jwt_refresh_ttl_hours)),
                ("Grant tables", summary.grant_tables.to_string()),
                ("Roles", summary.roles.to_string()),
            ];

            if format == OutputFormat::Table {
                output::print_success("Configuration is valid");
            }
            output::print_details(&summary, &fields, format);
            if placeholder && format == OutputFormat::Table {
                output::print_warning("auth.jwt_secret is the default placeholder");
            }
        }
    }

    Ok(Outcome::Done)
}
