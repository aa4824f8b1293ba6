//! Claims carried by access and refresh tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Claims encoded into both token types. The two differ only in lifetime
/// and signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id the token was issued to.
    pub sub: String,
    /// Token id. Timestamps have one-second resolution, so without this two
    /// logins in the same second would mint byte-identical tokens and the
    /// older session would not be superseded.
    pub jti: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Create claims for `user_id` expiring `ttl` from now.
    pub fn new(user_id: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.into(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expiry_follows_ttl() {
        let claims = TokenClaims::new("u1", Duration::from_secs(900));
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.exp - claims.iat, 900);
    }
}
