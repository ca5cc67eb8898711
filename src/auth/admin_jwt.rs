use crate::auth::config::AdminJwtConfig;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AdminJwtError {
    #[error("verification error: {0}")]
    Verify(String),
}

#[derive(Serialize, Deserialize)]
struct AdminClaims {
    iss: String,
    aud: String,
    sub: String, // admin_id
    iat: u64,
    exp: u64,
}

pub fn issue_admin_jwt(admin_id: &str, cfg: &AdminJwtConfig) -> Result<String, AdminJwtError> {
    let now = Utc::now().timestamp().max(0) as u64;
    let claims = AdminClaims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: admin_id.to_string(),
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| AdminJwtError::Verify(e.to_string()))
}

/// Returns the admin id carried in `sub`.
pub fn verify_admin_jwt(token: &str, cfg: &AdminJwtConfig) -> Result<String, AdminJwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AdminJwtError::Verify(e.to_string()))?;
    if data.claims.sub.trim().is_empty() {
        return Err(AdminJwtError::Verify("empty sub".to_string()));
    }
    Ok(data.claims.sub)
}
