//! Token issuing and verification.

use crate::claims::TokenClaims;
use crate::error::AuthError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use std::time::Duration;

/// Access token lifetime. Also the max-age on the access cookie, so the two
/// expire together.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Refresh token lifetime. Also the TTL on the credential store entry.
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and verifies both token types.
///
/// Access and refresh tokens are signed under distinct secrets so a leaked
/// access secret cannot forge refresh tokens and vice versa.
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Create an issuer from the two signing secrets.
    ///
    /// Fails with [`AuthError::MissingSecret`] when either secret is empty;
    /// callers treat that as fatal at startup.
    pub fn new(access_secret: &str, refresh_secret: &str) -> Result<Self, AuthError> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the whole point; no leeway.
        validation.leeway = 0;

        Ok(Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            validation,
        })
    }

    /// Mint a fresh access/refresh pair for `user_id`.
    pub fn issue_pair(&self, user_id: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue_access(user_id)?,
            refresh: sign(&TokenClaims::new(user_id, REFRESH_TOKEN_TTL), &self.refresh_encoding)?,
        })
    }

    /// Mint a fresh access token only. Used by the refresh endpoint, which
    /// leaves the refresh token and its store entry untouched.
    pub fn issue_access(&self, user_id: &str) -> Result<String, AuthError> {
        sign(&TokenClaims::new(user_id, ACCESS_TOKEN_TTL), &self.access_encoding)
    }

    /// Verify an access token. Expired tokens are reported as
    /// [`AuthError::Expired`] so the route guard can tell the client to
    /// refresh rather than re-authenticate.
    pub fn verify_access(&self, token: &str) -> Result<TokenClaims, AuthError> {
        verify(token, &self.access_decoding, &self.validation)
    }

    /// Verify a refresh token's signature and expiry. Store equality is the
    /// caller's job ([`crate::CredentialStore::matches`]).
    pub fn verify_refresh(&self, token: &str) -> Result<TokenClaims, AuthError> {
        verify(token, &self.refresh_decoding, &self.validation)
    }
}

fn sign(claims: &TokenClaims, key: &EncodingKey) -> Result<String, AuthError> {
    jsonwebtoken::encode(&Header::default(), claims, key)
        .map_err(|e| AuthError::TokenCreationFailed(e.to_string()))
}

fn verify(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<TokenClaims, AuthError> {
    match jsonwebtoken::decode::<TokenClaims>(token, key, validation) {
        Ok(data) => Ok(data.claims),
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(AuthError::Expired),
        Err(_) => Err(AuthError::Invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("access-secret", "refresh-secret").unwrap()
    }

    #[test]
    fn rejects_empty_secrets() {
        assert!(matches!(
            TokenIssuer::new("", "refresh"),
            Err(AuthError::MissingSecret)
        ));
        assert!(matches!(
            TokenIssuer::new("access", ""),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn issues_and_verifies_a_pair() {
        let issuer = issuer();
        let pair = issuer.issue_pair("u1").unwrap();

        assert_eq!(issuer.verify_access(&pair.access).unwrap().sub, "u1");
        assert_eq!(issuer.verify_refresh(&pair.refresh).unwrap().sub, "u1");
    }

    #[test]
    fn signing_domains_are_separate() {
        let issuer = issuer();
        let pair = issuer.issue_pair("u1").unwrap();

        // An access token must not verify as a refresh token or vice versa.
        assert!(matches!(
            issuer.verify_refresh(&pair.access),
            Err(AuthError::Invalid)
        ));
        assert!(matches!(
            issuer.verify_access(&pair.refresh),
            Err(AuthError::Invalid)
        ));
    }

    #[test]
    fn expired_is_distinguished_from_invalid() {
        let issuer = issuer();

        // Sign an already-expired access token under the right secret.
        let mut claims = TokenClaims::new("u1", Duration::from_secs(0));
        claims.iat -= 120;
        claims.exp -= 60;
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert!(matches!(issuer.verify_access(&token), Err(AuthError::Expired)));
        assert!(matches!(
            issuer.verify_access("not-a-token"),
            Err(AuthError::Invalid)
        ));
    }

    #[test]
    fn wrong_secret_is_invalid_not_expired() {
        let issuer = issuer();
        let other = TokenIssuer::new("someone-else", "entirely").unwrap();
        let pair = other.issue_pair("u1").unwrap();

        assert!(matches!(
            issuer.verify_access(&pair.access),
            Err(AuthError::Invalid)
        ));
    }
}
