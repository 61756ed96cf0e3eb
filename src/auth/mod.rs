use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Role carried by every token this service issues.
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "unique_name")]
    pub name: String,
    pub role: String,
    pub nbf: i64,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims valid from now for `expiry_hours`. Lifetimes chrono cannot represent are refused.
    pub fn new(name: impl Into<String>, role: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| JwtError::TokenGeneration(format!("token lifetime of {} hours is out of range", expiry_hours)))?
            .timestamp();

        Ok(Self {
            name: name.into(),
            role: role.into(),
            nbf: now.timestamp(),
            exp,
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

fn algorithm() -> Algorithm {
    Algorithm::HS512
}

/// Sign claims with the configured secret (HS512).
pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    let secret = &security.jwt_secret;
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(algorithm());

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature, `exp` and `nbf`. Issuer and audience are not checked.
pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    let secret = &security.jwt_secret;
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(algorithm());
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn security(secret: &str) -> SecurityConfig {
        let mut config = AppConfig::development().security;
        config.jwt_secret = secret.to_string();
        config
    }

    #[test]
    fn round_trips_claims() {
        let security = security("a-very-long-test-secret-for-hs512-signing");
        let token = generate_jwt(&Claims::new("Venkat", ADMIN_ROLE, 4).unwrap(), &security).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);

        let claims = validate_jwt(&token, &security).unwrap();
        assert_eq!(claims.name, "Venkat");
        assert_eq!(claims.role, "Admin");

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 4 * 3600);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_jwt(&Claims::new("Venkat", ADMIN_ROLE, 4).unwrap(), &security("first-secret")).unwrap();
        assert!(matches!(
            validate_jwt(&token, &security("second-secret")),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let security = security("expiry-secret");
        let mut claims = Claims::new("Venkat", ADMIN_ROLE, 4).unwrap();
        claims.nbf -= 10 * 3600;
        claims.iat -= 10 * 3600;
        claims.exp = claims.iat + 3600;

        let token = generate_jwt(&claims, &security).unwrap();
        assert!(validate_jwt(&token, &security).is_err());
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        assert!(matches!(
            Claims::new("Venkat", ADMIN_ROLE, 3_000_000_000),
            Err(JwtError::TokenGeneration(_))
        ));
        assert!(matches!(
            Claims::new("Venkat", ADMIN_ROLE, u64::MAX),
            Err(JwtError::TokenGeneration(_))
        ));

        let year = crate::config::MAX_JWT_EXPIRY_HOURS;
        let claims = Claims::new("Venkat", ADMIN_ROLE, year).unwrap();
        assert_eq!(claims.exp - claims.iat, year as i64 * 3600);
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            generate_jwt(&Claims::new("Venkat", ADMIN_ROLE, 4).unwrap(), &security("")),
            Err(JwtError::InvalidSecret)
        ));
    }
}
