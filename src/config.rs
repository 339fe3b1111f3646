use std::env;

use thiserror::Error;

use crate::domain::pricing::PricingPolicy;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_pool_size: u32,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub allowed_origins: AllowedOrigins,
    pub order_pricing: PricingPolicy,
    pub welcome_webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => 8080,
        };
        let db_pool_size = match get("DB_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_POOL_SIZE",
                        value: raw,
                        reason: "expected a positive integer".to_string(),
                    })
                }
            },
            None => 10,
        };
        let order_pricing = match get("ORDER_PRICING") {
            Some(raw) => raw.parse::<PricingPolicy>().map_err(|e| ConfigError::Invalid {
                name: "ORDER_PRICING",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => PricingPolicy::default(),
        };

        Ok(AppConfig {
            database_url: required("DATABASE_URL")?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            db_pool_size,
            jwt_secret: required("JWT_SECRET")?,
            jwt_audience: get("JWT_AUDIENCE").unwrap_or_else(|| "authenticated".to_string()),
            allowed_origins: parse_origins(get("ALLOWED_ORIGINS").as_deref()),
            order_pricing,
            welcome_webhook_url: get("WELCOME_WEBHOOK_URL"),
        })
    }
}

fn parse_origins(raw: Option<&str>) -> AllowedOrigins {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}
