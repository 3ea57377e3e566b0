//! Credential failure taxonomy.

use thiserror::Error;

use deskgate_core::error::{AppError, ErrorKind};

use super::claims::TokenType;

/// Errors raised while issuing or validating credentials.
///
/// The `Token*` variants describe bad token material and must surface to
/// callers as "not authenticated". They are never a policy decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// The token structure, encoding, or claim shape could not be parsed.
    #[error("Invalid token format: {0}")]
    TokenMalformed(String),
    /// The signature does not match the header and payload.
    #[error("Invalid token signature")]
    TokenSignatureInvalid,
    /// The current time is past the token's `exp`.
    #[error("Token has expired")]
    TokenExpired,
    /// An access token was presented where a refresh token was required, or vice versa.
    #[error("Invalid token type: expected {expected} token, got {actual} token")]
    TokenWrongType {
        /// The type the operation requires.
        expected: TokenType,
        /// The type the token carries.
        actual: TokenType,
    },
    /// Issuance was requested with no roles.
    #[error("At least one role is required to issue a token")]
    EmptyRoles,
    /// The expiry instant falls outside the representable date range.
    #[error("Token expiry is out of range")]
    ExpiryOutOfRange,
    /// The signer rejected the claims.
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl CredentialError {
    /// Whether the error describes presented token material.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::TokenMalformed(_)
                | Self::TokenSignatureInvalid
                | Self::TokenExpired
                | Self::TokenWrongType { .. }
        )
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        let kind = match &err {
            CredentialError::EmptyRoles => ErrorKind::Validation,
            CredentialError::ExpiryOutOfRange | CredentialError::Signing(_) => ErrorKind::Internal,
            _ => ErrorKind::Authentication,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_authentication() {
        let errors = [
            CredentialError::TokenMalformed("garbage".into()),
            CredentialError::TokenSignatureInvalid,
            CredentialError::TokenExpired,
            CredentialError::TokenWrongType {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            },
        ];
        for err in errors {
            assert!(err.is_token_error());
            assert_eq!(AppError::from(err).kind, ErrorKind::Authentication);
        }
    }

    #[test]
    fn test_issuance_errors_are_not_authentication() {
        assert_eq!(
            AppError::from(CredentialError::EmptyRoles).kind,
            ErrorKind::Validation
        );
        assert_eq!(
            AppError::from(CredentialError::Signing("boom".into())).kind,
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_wrong_type_message() {
        let err = CredentialError::TokenWrongType {
            expected: TokenType::Refresh,
            actual: TokenType::Access,
        };
        assert_eq!(
            err.to_string(),
            "Invalid token type: expected refresh token, got access token"
        );
    }
}
