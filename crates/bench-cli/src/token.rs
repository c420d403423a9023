//! HS256 bearer tokens for authenticated scenarios
//!
//! The minted token is printed so it can be exported as `TOKEN` before a
//! run. Claims are the registered `sub`, `iat` and `exp` only.

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Environment variable holding the shared signing secret
pub const ENV_JWT_SECRET: &str = "AUTH_JWT_SECRET";

pub const DEFAULT_SUBJECT: &str = "demo-user";

pub const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims issued now and expiring after `ttl`
    pub fn new(subject: impl Into<String>, ttl: Duration) -> Result<Self> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(ttl)
            .context("Token lifetime is too long")?;

        Ok(Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        })
    }
}

/// Lifetime of `hours` hours, rejecting values chrono cannot represent
pub fn ttl_from_hours(hours: i64) -> Result<Duration> {
    match Duration::try_hours(hours) {
        Some(ttl) => Ok(ttl),
        None => bail!("Token lifetime of {} hours is out of range", hours),
    }
}

/// Sign claims for `subject` with the shared secret
pub fn mint(secret: &str, subject: &str, ttl: Duration) -> Result<String> {
    if secret.is_empty() {
        bail!("missing {}", ENV_JWT_SECRET);
    }
    if ttl <= Duration::zero() {
        bail!("Token lifetime must be positive");
    }

    let claims = Claims::new(subject, ttl)?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("failed to generate token")
}

/// Read the signing secret from the environment
pub fn secret_from_env() -> Result<String> {
    match std::env::var(ENV_JWT_SECRET) {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ => bail!("missing {}", ENV_JWT_SECRET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn decode_claims(token: &str, secret: &str) -> jsonwebtoken::errors::Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }

    #[test]
    fn test_mint_round_trips_claims() {
        let token = mint("s3cret", "alice", Duration::hours(DEFAULT_TTL_HOURS)).unwrap();
        let claims = decode_claims(&token, "s3cret").unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = mint("s3cret", DEFAULT_SUBJECT, Duration::hours(1)).unwrap();
        assert!(decode_claims(&token, "other").is_err());
    }

    #[test]
    fn test_header_is_hs256() {
        let token = mint("s3cret", DEFAULT_SUBJECT, Duration::hours(1)).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_empty_secret_fails() {
        let err = mint("", DEFAULT_SUBJECT, Duration::hours(1)).unwrap_err();
        assert!(err.to_string().contains(ENV_JWT_SECRET));
    }

    #[test]
    fn test_out_of_range_ttl_fails() {
        assert!(ttl_from_hours(9_000_000_000_000_000).is_err());
        assert_eq!(ttl_from_hours(2).unwrap(), Duration::hours(2));

        // Representable, but the expiry overflows the calendar
        let ttl = ttl_from_hours(3_000_000_000).unwrap();
        let err = mint("s3cret", DEFAULT_SUBJECT, ttl).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_non_positive_ttl_fails() {
        assert!(mint("s3cret", DEFAULT_SUBJECT, Duration::zero()).is_err());
        assert!(mint("s3cret", DEFAULT_SUBJECT, Duration::hours(-1)).is_err());
    }
}
