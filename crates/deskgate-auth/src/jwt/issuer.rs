//! Credential issuance, validation, and refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deskgate_core::config::AuthConfig;
use deskgate_core::error::AppError;

use crate::model::Role;

use super::claims::{Claims, TokenType};
use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;
use super::error::CredentialError;

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issues, validates, and refreshes signed identity tokens.
///
/// Holds only the signing key and lifetimes, so it is cheap to clone and safe
/// to share across threads without synchronization.
#[derive(Debug, Clone)]
pub struct CredentialIssuer {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl CredentialIssuer {
    /// Creates an issuer from auth configuration.
    ///
    /// Fails if the signing secret is empty or a token lifetime is zero or
    /// out of range.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("JWT signing secret must not be empty"));
        }
        if config.uses_placeholder_secret() {
            tracing::warn!("JWT signing secret is the default placeholder; set auth.jwt_secret");
        }

        Ok(Self {
            encoder: JwtEncoder::new(config)?,
            decoder: JwtDecoder::new(config),
        })
    }

    /// Issues a signed token for the subject.
    ///
    /// The expiry is `custom_expiry` when given (used for time-bound
    /// contractor credentials), otherwise the configured default for
    /// `token_type`. Duplicate roles are collapsed, keeping first-seen order.
    pub fn generate_token(
        &self,
        subject_id: &str,
        email: &str,
        roles: &[Role],
        token_type: TokenType,
        custom_expiry: Option<DateTime<Utc>>,
    ) -> Result<String, CredentialError> {
        let now = Utc::now();
        let exp = match custom_expiry {
            Some(exp) => exp,
            None => self.encoder.default_expiry(token_type, now)?,
        };
        let claims = self.build_claims(subject_id, email, roles, token_type, now, exp)?;

        let token = self.encoder.encode(&claims)?;
        tracing::debug!(
            sub = %claims.sub,
            token_type = %token_type,
            exp = claims.exp,
            custom_expiry = custom_expiry.is_some(),
            "Issued token"
        );
        Ok(token)
    }

    /// Issues an access and a refresh token sharing one issue instant.
    pub fn generate_token_pair(
        &self,
        subject_id: &str,
        email: &str,
        roles: &[Role],
    ) -> Result<TokenPair, CredentialError> {
        let now = Utc::now();
        let access_exp = self.encoder.default_expiry(TokenType::Access, now)?;
        let refresh_exp = self.encoder.default_expiry(TokenType::Refresh, now)?;

        let access_claims =
            self.build_claims(subject_id, email, roles, TokenType::Access, now, access_exp)?;
        let refresh_claims =
            self.build_claims(subject_id, email, roles, TokenType::Refresh, now, refresh_exp)?;

        Ok(TokenPair {
            access_token: self.encoder.encode(&access_claims)?,
            refresh_token: self.encoder.encode(&refresh_claims)?,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }

    /// Verifies the signature, then the expiry, and returns the claims unchanged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.decoder.decode(token)
    }

    /// Validates a token and requires it to be an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, CredentialError> {
        let claims = self.validate_token(token)?;
        expect_type(&claims, TokenType::Access)?;
        Ok(claims)
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The new token copies subject, email, and roles, but gets a fresh
    /// default access expiry rather than the refresh token's own.
    pub fn refresh_token(&self, refresh_token: &str) -> Result<String, CredentialError> {
        let claims = self.validate_token(refresh_token)?;
        expect_type(&claims, TokenType::Refresh)?;

        self.generate_token(
            &claims.sub,
            &claims.email,
            &claims.roles,
            TokenType::Access,
            None,
        )
    }

    fn build_claims(
        &self,
        subject_id: &str,
        email: &str,
        roles: &[Role],
        token_type: TokenType,
        now: DateTime<Utc>,
        exp: DateTime<Utc>,
    ) -> Result<Claims, CredentialError> {
        if roles.is_empty() {
            return Err(CredentialError::EmptyRoles);
        }

        let mut unique = Vec::with_capacity(roles.len());
        for role in roles {
            if !unique.contains(role) {
                unique.push(*role);
            }
        }

        Ok(Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            roles: unique,
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

fn expect_type(claims: &Claims, expected: TokenType) -> Result<(), CredentialError> {
    if claims.token_type != expected {
        return Err(CredentialError::TokenWrongType {
            expected,
            actual: claims.token_type,
        });
    }
    Ok(())
}
