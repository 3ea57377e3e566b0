//! Policy query CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use deskgate_auth::{BundleType, Permission, PolicyEngine, PolicyTables, Role, parse_roles};
use deskgate_core::config::AppConfig;
use deskgate_core::AppResult;

use super::Outcome;

/// Arguments for policy commands
#[derive(Debug, Args)]
pub struct PolicyArgs {
    /// Policy subcommand
    #[command(subcommand)]
    pub command: PolicyCommand,
}

/// Policy subcommands
#[derive(Debug, Subcommand)]
pub enum PolicyCommand {
    /// Check whether the roles grant a permission
    Check {
        /// Role held by the principal (repeatable); unknown roles grant nothing
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Permission to check, e.g. workspace_create
        #[arg(long)]
        permission: Permission,
        /// Expiry of a separate time-bound credential (RFC 3339)
        #[arg(long)]
        credential_expiry: Option<DateTime<Utc>>,
    },
    /// Check whether the roles may provision a bundle type
    BundleCheck {
        /// Role held by the principal (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Bundle type, e.g. GRAPHICS_G4DN
        #[arg(long)]
        bundle: BundleType,
    },
    /// List the permissions granted to the roles
    Permissions {
        /// Role held by the principal (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// List the bundle types the roles may provision
    Bundles {
        /// Role held by the principal (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// Print the effective grant table
    Table,
}

/// Decision output
#[derive(Debug, Serialize)]
struct Decision<'a> {
    roles: &'a [Role],
    subject: String,
    allowed: bool,
}

/// Grant table row
#[derive(Debug, Serialize, Tabled)]
struct GrantRow {
    /// Role
    role: String,
    /// Permissions
    permissions: String,
    /// Bundle types
    bundles: String,
}

/// Name row for permission and bundle listings
#[derive(Debug, Serialize, Tabled)]
struct NameRow {
    /// Name
    name: String,
}

/// Execute policy commands
pub fn execute(
    args: &PolicyArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<Outcome> {
    let engine = PolicyEngine::with_tables(PolicyTables::from_config(&config.policy)?);

    match &args.command {
        PolicyCommand::Check {
            roles,
            permission,
            credential_expiry,
        } => {
            let roles = parse_roles(roles);
            let allowed = engine.has_permission(&roles, *permission, *credential_expiry);
            Ok(print_decision(&roles, permission.as_str(), allowed, format))
        }
        PolicyCommand::BundleCheck { roles, bundle } => {
            let roles = parse_roles(roles);
            let allowed = engine.check_bundle_access(&roles, *bundle);
            Ok(print_decision(&roles, bundle.as_str(), allowed, format))
        }
        PolicyCommand::Permissions { roles } => {
            let mut permissions: Vec<Permission> = engine
                .get_permissions_for_roles(&parse_roles(roles))
                .into_iter()
                .collect();
            permissions.sort();
            output::print_list(&name_rows(permissions.iter().map(|p| p.as_str())), format);
            Ok(Outcome::Done)
        }
        PolicyCommand::Bundles { roles } => {
            let mut bundles: Vec<BundleType> = engine
                .get_allowed_bundle_types(&parse_roles(roles))
                .into_iter()
                .collect();
            bundles.sort();
            output::print_list(&name_rows(bundles.iter().map(|b| b.as_str())), format);
            Ok(Outcome::Done)
        }
        PolicyCommand::Table => {
            let rows: Vec<GrantRow> = engine
                .tables()
                .roles()
                .into_iter()
                .map(|role| grant_row(&engine, role))
                .collect();
            output::print_list(&rows, format);
            Ok(Outcome::Done)
        }
    }
}

fn print_decision(roles: &[Role], subject: &str, allowed: bool, format: OutputFormat) -> Outcome {
    match format {
        OutputFormat::Json => output::print_details(
            &Decision {
                roles,
                subject: subject.to_string(),
                allowed,
            },
            &[],
            format,
        ),
        OutputFormat::Table if allowed => output::print_success(&format!("{subject}: allowed")),
        OutputFormat::Table => output::print_warning(&format!("{subject}: not authorized")),
    }

    if allowed { Outcome::Done } else { Outcome::Denied }
}

fn grant_row(engine: &PolicyEngine, role: Role) -> GrantRow {
    let mut permissions: Vec<Permission> =
        engine.tables().permissions_for_role(&role).into_iter().collect();
    permissions.sort();
    let mut bundles: Vec<BundleType> =
        engine.tables().bundles_for_role(&role).into_iter().collect();
    bundles.sort();

    GrantRow {
        role: role.to_string(),
        permissions: join(permissions.iter().map(|p| p.as_str())),
        bundles: join(bundles.iter().map(|b| b.as_str())),
    }
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn name_rows<'a>(names: impl Iterator<Item = &'a str>) -> Vec<NameRow> {
    names
        .map(|name| NameRow {
            name: name.to_string(),
        })
        .collect()
}
