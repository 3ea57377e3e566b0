//! JWT token validation.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use deskgate_core::config::AuthConfig;

use super::claims::Claims;
use super::error::CredentialError;

/// Verifies HS256 tokens and maps failures onto [`CredentialError`].
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = config.clock_skew_leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes a token of either type.
    ///
    /// The signature is verified before any claim is looked at; expiry is
    /// checked last.
    pub fn decode(&self, token: &str) -> Result<Claims, CredentialError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => CredentialError::TokenExpired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        tracing::warn!("Rejected token with invalid signature");
                        CredentialError::TokenSignatureInvalid
                    }
                    ErrorKind::InvalidToken => {
                        CredentialError::TokenMalformed("expected three segments".to_string())
                    }
                    _ => CredentialError::TokenMalformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
