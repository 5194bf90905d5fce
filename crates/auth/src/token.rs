//! JWT issuance and verification.
//!
//! # Invariants
//! - Validation is stateless (no store lookup).
//! - Claims carry only the subject e_mail, the seller id, and expiry.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity assertion embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the seller's e_mail at issuance time.
    pub sub: String,
    /// Store-assigned seller id; the identity used by ownership checks.
    pub seller_id: i64,
    /// Expiration timestamp (unix seconds).
    pub exp: i64,
}

/// Signing configuration, supplied via process environment at startup.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    /// Algorithm identifier, e.g. "HS256".
    pub algorithm: String,
    pub token_ttl_minutes: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            algorithm: "HS256".to_string(),
            token_ttl_minutes: 30,
        }
    }
}

/// Stateless token service: issues and verifies signed identity assertions.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Builds a service from configuration; fails on an unknown algorithm.
    pub fn new(config: &TokenConfig) -> AuthResult<Self> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        Ok(Self {
            algorithm,
            ttl: Duration::minutes(config.token_ttl_minutes),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    /// Issues a token asserting `seller_id` until the configured TTL elapses.
    pub fn issue(&self, subject: &str, seller_id: i64) -> AuthResult<String> {
        let expires = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            seller_id,
            exp: expires.unix_timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Decodes and signature-checks a presented token.
    ///
    /// Accepts both the raw token and the `"Bearer <token>"` form; the prefix
    /// is stripped before decoding.
    pub fn verify(&self, presented: &str) -> AuthResult<Claims> {
        let token = presented.strip_prefix(BEARER_PREFIX).unwrap_or(presented);

        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }
}

fn parse_algorithm(name: &str) -> AuthResult<Algorithm> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AuthError::UnsupportedAlgorithm(other.to_string())),
    }
}
