use std::env;

use crate::services::aggregator::FEATURED_LIMIT;
use crate::services::auth_service::JwtSettings;
use crate::utils::{AppError, CompanyKey};

/// Runtime settings read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtSettings,
    pub company_key: CompanyKey,
    pub featured_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3002".to_string())
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("PORT: {}", e)))?;
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::ConfigError("DATABASE_URL must be set".into()))?;

        let company_key = match env::var("COMPANY_KEY") {
            Ok(value) => CompanyKey::parse(&value).ok_or_else(|| {
                AppError::ConfigError(format!("COMPANY_KEY must be exact or folded, got '{}'", value))
            })?,
            Err(_) => CompanyKey::default(),
        };

        let featured_limit = match env::var("FEATURED_LIMIT") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|e| AppError::ConfigError(format!("FEATURED_LIMIT: {}", e)))?,
            Err(_) => FEATURED_LIMIT,
        };

        Ok(Config {
            host,
            port,
            database_url,
            jwt: JwtSettings::from_env(),
            company_key,
            featured_limit,
        })
    }
}

/// Base URL of the service as seen by the browse client.
pub fn search_base_url() -> String {
    env::var("SEARCH_BASE_URL").unwrap_or_else(|_| "http://localhost:3002".to_string())
}
