//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every section has defaults, so an empty file is a valid
//! configuration.

pub mod auth;
pub mod logging;
pub mod policy;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::policy::{PolicyConfig, RoleGrantConfig};

use crate::error::AppError;
use crate::result::AppResult;

/// Prefix for environment variable overrides, e.g. `DESKGATE__AUTH__JWT_SECRET`.
const ENV_PREFIX: &str = "DESKGATE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Role grant table overrides.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for a named environment.
    ///
    /// Merges `config/default` with a `config/{env}` overlay and environment
    /// variables prefixed with `DESKGATE`.
    pub fn load(env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(env_source())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Load configuration from an explicit file, then apply environment overrides.
    ///
    /// A missing file is an error here, unlike [`AppConfig::load`].
    pub fn load_from(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(env_source())
            .build()?;

        tracing::debug!(path = %path.display(), "Loaded configuration file");

        Ok(config.try_deserialize()?)
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.auth.jwt_access_ttl_minutes, 15);
        assert_eq!(config.auth.jwt_refresh_ttl_hours, 24);
        assert_eq!(config.auth.clock_skew_leeway_seconds, 0);
        assert!(config.auth.uses_placeholder_secret());
        assert!(config.policy.is_builtin());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("deskgate.toml");
        std::fs::write(
            &path,
            r#"
[auth]
jwt_secret = "file-secret"
jwt_access_ttl_minutes = 5

[policy.roles.contractor]
permissions = ["workspace_create"]
bundles = ["STANDARD"]

[logging]
format = "json"
"#,
        )
        .expect("write");

        let config = AppConfig::load_from(&path).expect("should load");
        assert_eq!(config.auth.jwt_secret, "file-secret");
        assert_eq!(config.auth.jwt_access_ttl_minutes, 5);
        assert_eq!(config.auth.jwt_refresh_ttl_hours, 24);
        assert!(!config.auth.uses_placeholder_secret());
        assert_eq!(config.logging.format, "json");

        let contractor = config.policy.roles.get("contractor").expect("contractor");
        assert_eq!(contractor.permissions, vec!["workspace_create".to_string()]);
        assert_eq!(contractor.bundles, vec!["STANDARD".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppConfig::load_from("/nonexistent/deskgate.toml").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            jwt_secret: "super-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
