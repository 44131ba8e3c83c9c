//! Application configuration from environment variables
//!
//! | Env Var       | Required        | Default                      |
//! |---------------|-----------------|------------------------------|
//! | `JWT_SECRET`  | **yes**         | --                           |
//! | `BUREAU_ADDR` | no              | `127.0.0.1:3000`             |
//! | `MONGODB_URI` | mongodb backend | `mongodb://localhost:27017`  |
//! | `MONGODB_DB`  | mongodb backend | `bureau`                     |
//!
//! `JWT_SECRET` has no default: a missing or empty secret is a startup
//! error.

use anyhow::{Result, bail};

use crate::auth::jwt::JwtConfig;

/// Runtime configuration for the bureau server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub addr: String,
    /// JWT signing configuration
    pub jwt: JwtConfig,
    /// MongoDB connection string (mongodb backend only)
    pub mongodb_uri: String,
    /// MongoDB database name (mongodb backend only)
    pub mongodb_db: String,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a lookup function (testable without
    /// touching the process environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secret = match lookup("JWT_SECRET") {
            Some(s) if !s.is_empty() => s,
            _ => bail!("JWT_SECRET must be set in the environment and non-empty"),
        };

        Ok(Self {
            addr: lookup("BUREAU_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string()),
            jwt: JwtConfig::new(secret),
            mongodb_uri: lookup("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            mongodb_db: lookup("MONGODB_DB").unwrap_or_else(|| "bureau".to_string()),
        })
    }
}
