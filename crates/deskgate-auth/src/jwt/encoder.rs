//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use deskgate_core::config::AuthConfig;
use deskgate_core::error::AppError;

use super::claims::{Claims, TokenType};
use super::error::CredentialError;

/// Signs claims into compact HS256 tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: TimeDelta,
    /// Refresh token lifetime.
    refresh_ttl: TimeDelta,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails if a lifetime is zero or would put the expiry outside the
    /// representable date range.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let access_ttl = lifetime(
            "jwt_access_ttl_minutes",
            config.jwt_access_ttl_minutes,
            TimeDelta::try_minutes,
        )?;
        let refresh_ttl = lifetime(
            "jwt_refresh_ttl_hours",
            config.jwt_refresh_ttl_hours,
            TimeDelta::try_hours,
        )?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    /// Default expiry for a token of the given type issued at `now`.
    pub fn default_expiry(
        &self,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, CredentialError> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        now.checked_add_signed(ttl)
            .ok_or(CredentialError::ExpiryOutOfRange)
    }

    /// Signs the claims with the default `{"typ":"JWT","alg":"HS256"}` header.
    pub fn encode(&self, claims: &Claims) -> Result<String, CredentialError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            CredentialError::Signing(format!("Failed to encode {} token: {e}", claims.token_type))
        })
    }
}

fn lifetime(
    key: &str,
    value: u64,
    to_delta: fn(i64) -> Option<TimeDelta>,
) -> Result<TimeDelta, AppError> {
    if value == 0 {
        return Err(AppError::configuration(format!("auth.{key} must be greater than zero")));
    }

    i64::try_from(value)
        .ok()
        .and_then(to_delta)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| AppError::configuration(format!("auth.{key} is out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_past_date_range_is_an_error() {
        let encoder = JwtEncoder::new(&AuthConfig::default()).expect("encoder");
        assert_eq!(
            encoder.default_expiry(TokenType::Access, DateTime::<Utc>::MAX_UTC),
            Err(CredentialError::ExpiryOutOfRange)
        );
        assert!(encoder.default_expiry(TokenType::Refresh, Utc::now()).is_ok());
    }
}
