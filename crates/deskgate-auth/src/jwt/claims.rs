//! JWT claims structure used in access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Role;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity provider's user ID.
    pub sub: String,
    /// Email address of the subject.
    pub email: String,
    /// Roles at the time of issuance, in issuance order.
    pub roles: Vec<Role>,
    /// Token type: "access" or "refresh".
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

impl TokenType {
    /// Return the token type as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Claims {
    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    ///
    /// An out-of-range `exp` maps to the Unix epoch, which reads as expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Checks whether this token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }

    /// Whether the claims carry the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "u1".into(),
            email: "u1@x.com".into(),
            roles: vec![Role::Engineer],
            token_type: TokenType::Access,
            iat: 1_700_000_000,
            exp,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(claims(1_700_000_900)).expect("serialize");
        assert_eq!(value["sub"], "u1");
        assert_eq!(value["email"], "u1@x.com");
        assert_eq!(value["roles"], serde_json::json!(["engineer"]));
        assert_eq!(value["type"], "access");
        assert_eq!(value["iat"], 1_700_000_000);
        assert_eq!(value["exp"], 1_700_000_900);
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let c = claims(1_700_000_900);
        let at_exp = DateTime::from_timestamp(1_700_000_900, 0).unwrap();
        let after = DateTime::from_timestamp(1_700_000_901, 0).unwrap();
        assert!(!c.is_expired_at(at_exp));
        assert!(c.is_expired_at(after));
    }

    #[test]
    fn test_has_role() {
        let c = claims(0);
        assert!(c.has_role(Role::Engineer));
        assert!(!c.has_role(Role::Admin));
        assert_eq!(c.remaining_ttl_seconds(), 0);
    }
}
