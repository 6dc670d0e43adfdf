use std::collections::HashSet;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::CurrentUser;
use crate::utils::AppError;

// JWT Claims issued by the identity provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // user id
    #[serde(default)]
    pub email: Option<String>,
    pub iat: usize,
    pub exp: usize,
    pub aud: String,
    pub iss: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        CurrentUser {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// HS256 verification parameters.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl JwtSettings {
    pub fn from_env() -> Self {
        JwtSettings {
            secret: get_jwt_secret(),
            issuer: get_jwt_issuer(),
            audience: get_jwt_audience(),
        }
    }
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "prep-well".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "prep-well-api".to_string())
}

pub fn verify_token(token: &str, settings: &JwtSettings) -> Result<CurrentUser, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[settings.audience.as_str()]);

    let mut issuers = HashSet::new();
    issuers.insert(settings.issuer.clone());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.into())
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
