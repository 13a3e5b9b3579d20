//! JWT token generation and validation
//!
//! Provides access and refresh token management with pre-computed keys.
//! Tokens are stateless: validity is signature plus expiry, nothing is
//! stored server side and there is no revocation list. A refresh token
//! therefore stays usable until it expires, even after it has been
//! exchanged for a new pair.

use super::error::AuthError;
use crate::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Invalid signing configuration; fatal at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("JWT secret key must not be empty")]
    EmptySecret,

    #[error("Unsupported JWT algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be positive and representable: {0}")]
    InvalidTtl(&'static str),
}

/// Kind of token, carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email). Empty when the token carried none.
    #[serde(default)]
    pub sub: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// An access token together with its refresh token
#[derive(Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// Bearer tokens stay out of logs.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Issues and verifies signed bearer tokens
///
/// Built once at startup from [`JwtConfig`] and cloned into handlers; keys
/// and validation rules live behind `Arc`.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    header: Header,
    validation: Arc<Validation>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create the service, rejecting unusable configuration
    pub fn new(config: &JwtConfig) -> Result<Self, TokenConfigError> {
        if config.secret_key.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }

        let algorithm = parse_algorithm(&config.algorithm)?;

        let access_ttl = checked_ttl(
            Duration::try_minutes(config.access_token_expire_minutes),
            "access_token_expire_minutes",
        )?;
        let refresh_ttl = checked_ttl(
            Duration::try_days(config.refresh_token_expire_days),
            "refresh_token_expire_days",
        )?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            keys: JwtKeys::new(&config.secret_key),
            header: Header::new(algorithm),
            validation: Arc::new(validation),
            access_ttl,
            refresh_ttl,
        })
    }

    /// Issue a token of the given kind for `subject`
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl(kind))
            .ok_or_else(|| anyhow::anyhow!("{} token expiry overflows", kind))?;
        let claims = Claims {
            sub: subject.to_string(),
            kind,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        self.sign(&claims)
    }

    /// Issue an access token and a refresh token for `subject`
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue(subject, TokenKind::Access)?,
            refresh_token: self.issue(subject, TokenKind::Refresh)?,
        })
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// Every failure collapses into [`AuthError::TokenInvalid`]; the reason
    /// is only logged.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| {
                debug!(reason = %e, "Token rejected");
                AuthError::TokenInvalid
            })?
            .claims;

        if claims.exp <= Utc::now().timestamp() {
            debug!("Token rejected: expired");
            return Err(AuthError::TokenInvalid);
        }

        Ok(claims)
    }

    /// Verify a token and require a specific kind
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let claims = self.verify(token)?;
        if claims.kind != expected {
            debug!(expected = %expected, actual = %claims.kind, "Token rejected: wrong type");
            return Err(AuthError::TokenWrongType);
        }
        Ok(claims)
    }

    /// Lifetime of tokens of the given kind
    #[inline]
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&self.header, claims, &self.keys.encoding).map_err(|e| {
            AuthError::Internal(anyhow::anyhow!("Failed to sign {} token: {}", claims.kind, e))
        })
    }
}

/// A lifetime must be positive and leave `now + ttl` inside chrono's range
fn checked_ttl(ttl: Option<Duration>, field: &'static str) -> Result<Duration, TokenConfigError> {
    ttl.filter(|ttl| *ttl > Duration::zero() && Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or(TokenConfigError::InvalidTtl(field))
}

fn parse_algorithm(name: &str) -> Result<Algorithm, TokenConfigError> {
    match Algorithm::from_str(name) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(TokenConfigError::UnsupportedAlgorithm(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret_key: "test-secret".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 7,
        }
    }

    fn create_test_service() -> TokenService {
        TokenService::new(&test_config()).unwrap()
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let service = create_test_service();

        let token = service.issue("alice@example.com", TokenKind::Access).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_issue_and_verify_refresh_token() {
        let service = create_test_service();

        let token = service.issue("alice@example.com", TokenKind::Refresh).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_is_three_part_jwt_with_type_claim() {
        let service = create_test_service();
        let token = service.issue("alice@example.com", TokenKind::Refresh).unwrap();

        assert_eq!(token.split('.').count(), 3);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);

        let raw = decode::<serde_json::Value>(&token, &service.keys.decoding, &service.validation)
            .unwrap()
            .claims;
        assert_eq!(raw["type"], "refresh");
        assert_eq!(raw["sub"], "alice@example.com");
    }

    #[test]
    fn test_issue_pair_differs_in_type() {
        let service = create_test_service();
        let pair = service.issue_pair("alice@example.com").unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(service.verify(&pair.access_token).unwrap().kind, TokenKind::Access);
        assert_eq!(service.verify(&pair.refresh_token).unwrap().kind, TokenKind::Refresh);
    }

    #[test]
    fn test_refresh_token_rejected_where_access_required() {
        let service = create_test_service();
        let token = service.issue("alice@example.com", TokenKind::Refresh).unwrap();

        let result = service.verify_kind(&token, TokenKind::Access);
        assert!(matches!(result, Err(AuthError::TokenWrongType)));
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let service = create_test_service();
        let token = service.issue("alice@example.com", TokenKind::Access).unwrap();

        let result = service.verify_kind(&token, TokenKind::Refresh);
        assert!(matches!(result, Err(AuthError::TokenWrongType)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            kind: TokenKind::Access,
            exp: now - 5,
            iat: now - 65,
        };
        let token = service.sign(&claims).unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new(&JwtConfig {
            secret_key: "wrong-secret-key".to_string(),
            ..test_config()
        })
        .unwrap();

        let token = other.issue("alice@example.com", TokenKind::Access).unwrap();
        assert!(matches!(service.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_token_signed_with_other_algorithm_rejected() {
        let service = create_test_service();
        let other = TokenService::new(&JwtConfig {
            algorithm: "HS512".to_string(),
            ..test_config()
        })
        .unwrap();

        let token = other.issue("alice@example.com", TokenKind::Access).unwrap();
        assert!(matches!(service.verify(&token), Err(AuthError::TokenInvalid)));
        assert!(other.verify(&token).is_ok());
    }

    #[test]
    fn test_unknown_type_claim_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let token = encode(
            &service.header,
            &serde_json::json!({ "sub": "alice@example.com", "type": "admin", "exp": now + 60 }),
            &service.keys.encoding,
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[rstest]
    #[case("")]
    #[case("invalid.token.here")]
    #[case("not-a-jwt")]
    #[case("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwiZXhwIjoxfQ.invalid")]
    fn test_malformed_tokens_rejected(#[case] token: &str) {
        let service = create_test_service();
        assert!(matches!(service.verify(token), Err(AuthError::TokenInvalid)));
    }

    #[rstest]
    #[case("HS256")]
    #[case("HS384")]
    #[case("HS512")]
    fn test_supported_algorithms(#[case] algorithm: &str) {
        let service = TokenService::new(&JwtConfig {
            algorithm: algorithm.to_string(),
            ..test_config()
        })
        .unwrap();

        let token = service.issue("alice@example.com", TokenKind::Access).unwrap();
        assert_eq!(service.verify(&token).unwrap().sub, "alice@example.com");
    }

    #[rstest]
    #[case("RS256")]
    #[case("none")]
    #[case("hs256")]
    #[case("")]
    fn test_unsupported_algorithms_rejected(#[case] algorithm: &str) {
        let result = TokenService::new(&JwtConfig {
            algorithm: algorithm.to_string(),
            ..test_config()
        });
        assert_eq!(
            result.err(),
            Some(TokenConfigError::UnsupportedAlgorithm(algorithm.to_string()))
        );
    }

    #[test]
    fn test_empty_secret_rejected() {
        let result = TokenService::new(&JwtConfig {
            secret_key: String::new(),
            ..test_config()
        });
        assert_eq!(result.err(), Some(TokenConfigError::EmptySecret));
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = TokenService::new(&JwtConfig {
            access_token_expire_minutes: 0,
            ..test_config()
        });
        assert_eq!(
            result.err(),
            Some(TokenConfigError::InvalidTtl("access_token_expire_minutes"))
        );
    }

    #[rstest]
    #[case(i64::MAX)]
    #[case(100_000_000)]
    fn test_out_of_range_refresh_ttl_rejected(#[case] days: i64) {
        let result = TokenService::new(&JwtConfig {
            refresh_token_expire_days: days,
            ..test_config()
        });
        assert_eq!(
            result.err(),
            Some(TokenConfigError::InvalidTtl("refresh_token_expire_days"))
        );
    }

    #[test]
    fn test_out_of_range_access_ttl_rejected() {
        let result = TokenService::new(&JwtConfig {
            access_token_expire_minutes: i64::MAX,
            ..test_config()
        });
        assert_eq!(
            result.err(),
            Some(TokenConfigError::InvalidTtl("access_token_expire_minutes"))
        );
    }

    #[test]
    fn test_token_expiring_now_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            kind: TokenKind::Access,
            exp: now,
            iat: now - 60,
        };
        let token = service.sign(&claims).unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_missing_subject_decodes_as_empty() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let token = encode(
            &service.header,
            &serde_json::json!({ "type": "access", "exp": now + 60 }),
            &service.keys.encoding,
        )
        .unwrap();

        let claims = service.verify(&token).unwrap();
        assert!(claims.sub.is_empty());
        assert_eq!(claims.iat, 0);
    }

    #[test]
    fn test_token_pair_debug_redacts_tokens() {
        let pair = create_test_service().issue_pair("alice@example.com").unwrap();
        let debug_str = format!("{:?}", pair);

        assert!(!debug_str.contains(&pair.access_token));
        assert!(!debug_str.contains(&pair.refresh_token));
        assert!(debug_str.contains("<redacted>"));
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone();
        assert!(Arc::ptr_eq(&service.keys.encoding, &cloned.keys.encoding));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_subject_round_trips(subject in "[a-z0-9._+-]{1,32}@[a-z0-9-]{1,16}\\.[a-z]{2,6}") {
            let service = create_test_service();
            let token = service.issue(&subject, TokenKind::Access).unwrap();
            let claims = service.verify_kind(&token, TokenKind::Access).unwrap();
            prop_assert_eq!(claims.sub, subject);
            prop_assert_eq!(claims.kind, TokenKind::Access);
        }
    }
}
