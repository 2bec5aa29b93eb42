/**
 * Token Issuance
 *
 * HS256 JWTs carrying `sub` (username), `iat` and `exp = iat + ttl`, all
 * times in Unix seconds. The signing secret is shared configuration; it is
 * held only as jsonwebtoken keys and never printed.
 */

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token TTL out of range")]
    InvalidTtl,
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Signs and checks HS256 tokens with one shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenIssuer {
    /// Create an issuer
    ///
    /// # Arguments
    /// * `secret` - HMAC secret
    /// * `ttl` - Token lifetime, must be at least one second
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        let ttl = TimeDelta::from_std(ttl).map_err(|_| TokenError::InvalidTtl)?;
        if ttl < TimeDelta::seconds(1) {
            return Err(TokenError::InvalidTtl);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        })
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    ///
    /// Same inputs, same token.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires = now.checked_add_signed(self.ttl).ok_or(TokenError::InvalidTtl)?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Check signature, algorithm and expiry, and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Decode)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::from_secs(1800)).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let token = issuer().issue("alice").unwrap();
        let claims = issuer().verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_issue_at_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let first = issuer().issue_at("alice", now).unwrap();
        let second = issuer().issue_at("alice", now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_is_hs256() {
        let token = issuer().issue("alice").unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let long_ago = Utc::now() - TimeDelta::hours(2);
        let token = issuer().issue_at("alice", long_ago).unwrap();
        assert_matches!(issuer().verify(&token), Err(TokenError::Decode(_)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let other = TokenIssuer::new(b"other-secret", Duration::from_secs(1800)).unwrap();
        let token = other.issue("alice").unwrap();
        assert_matches!(issuer().verify(&token), Err(TokenError::Decode(_)));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        assert_matches!(TokenIssuer::new(SECRET, Duration::ZERO), Err(TokenError::InvalidTtl));
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", issuer());
        assert!(rendered.contains("HS256"));
        assert!(!rendered.contains("test-secret"));
    }
}
