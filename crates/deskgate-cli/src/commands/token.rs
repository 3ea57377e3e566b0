//! Token issuance and inspection CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{self, OutputFormat};
use deskgate_auth::{Claims, CredentialIssuer, TokenType, parse_roles};
use deskgate_core::config::AppConfig;
use deskgate_core::AppResult;

use super::Outcome;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a signed token
    Issue {
        /// Subject (user) ID
        #[arg(long)]
        sub: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Role to embed (repeatable)
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
        /// Issue a refresh token instead of an access token
        #[arg(long)]
        refresh: bool,
        /// Explicit expiry (RFC 3339), e.g. for time-bound contractor access
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,
    },
    /// Issue an access and refresh token pair
    Pair {
        /// Subject (user) ID
        #[arg(long)]
        sub: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Role to embed (repeatable)
        #[arg(long = "role", required = true)]
        roles: Vec<String>,
    },
    /// Validate a token and print its claims
    Validate {
        /// Compact token
        token: String,
    },
    /// Exchange a refresh token for a new access token
    Refresh {
        /// Compact refresh token
        token: String,
    },
}

/// Issued token output
#[derive(Debug, Serialize)]
struct IssuedToken {
    token: String,
    token_type: TokenType,
}

/// Execute token commands
pub fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<Outcome> {
    let issuer = CredentialIssuer::new(&config.auth)?;

    match &args.command {
        TokenCommand::Issue {
            sub,
            email,
            roles,
            refresh,
            expires_at,
        } => {
            let roles = parse_roles(roles);
            let token_type = if *refresh {
                TokenType::Refresh
            } else {
                TokenType::Access
            };

            let token = issuer.generate_token(sub, email, &roles, token_type, *expires_at)?;
            print_token(IssuedToken { token, token_type }, format);
        }
        TokenCommand::Pair { sub, email, roles } => {
            let pair = issuer.generate_token_pair(sub, email, &parse_roles(roles))?;
            let fields = [
                ("Access token", pair.access_token.clone()),
                ("Access expires", pair.access_expires_at.to_rfc3339()),
                ("Refresh token", pair.refresh_token.clone()),
                ("Refresh expires", pair.refresh_expires_at.to_rfc3339()),
            ];
            output::print_details(&pair, &fields, format);
        }
        TokenCommand::Validate { token } => {
            let claims = issuer.validate_token(token)?;
            print_claims(&claims, format);
        }
        TokenCommand::Refresh { token } => {
            let token = issuer.refresh_token(token)?;
            print_token(
                IssuedToken {
                    token,
                    token_type: TokenType::Access,
                },
                format,
            );
        }
    }

    Ok(Outcome::Done)
}

/// Bare token in table mode so it can be piped into another command.
fn print_token(issued: IssuedToken, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", issued.token),
        OutputFormat::Json => output::print_details(&issued, &[], format),
    }
}

fn print_claims(claims: &Claims, format: OutputFormat) {
    let roles: Vec<&str> = claims.roles.iter().map(|r| r.as_str()).collect();
    let mut fields = vec![
        ("Subject", claims.sub.clone()),
        ("Email", claims.email.clone()),
        ("Roles", roles.join(", ")),
        ("Type", claims.token_type.to_string()),
    ];
    if let Some(iat) = claims.issued_at() {
        fields.push(("Issued", iat.to_rfc3339()));
    }
    fields.push(("Expires", claims.expires_at().to_rfc3339()));
    fields.push(("Remaining", format!("{}s", claims.remaining_ttl_seconds())));

    if format == OutputFormat::Table {
        output::print_success("Token is valid");
    }
    output::print_details(claims, &fields, format);
}
