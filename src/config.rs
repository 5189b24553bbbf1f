use dotenv::dotenv;
use std::env;

use crate::error::ApiError;

/// Runtime configuration, loaded once at startup and handed to the API
/// layer at construction. Handlers never read the environment directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Gates POST/PUT/DELETE routes; reads are always permitted.
    pub enable_crud: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok(); // Load .env file if present
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "pawspots.db".to_string()),
            port: match env::var("PORT") {
                Ok(value) => value.parse()?,
                Err(_) => 8080,
            },
            enable_crud: env::var("ENABLE_CRUD")
                .map(|value| parse_flag(&value))
                .unwrap_or(true),
        })
    }

    /// Fails mutating requests before they reach a repository.
    pub fn ensure_crud_enabled(&self) -> Result<(), ApiError> {
        if self.enable_crud {
            Ok(())
        } else {
            Err(ApiError::CrudDisabled)
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_defaults_to_enabled() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag("anything"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(" off "));
        assert!(!parse_flag("no"));
    }

    #[test]
    fn crud_gate_rejects_when_disabled() {
        let config = AppConfig {
            database_url: ":memory:".to_string(),
            port: 0,
            enable_crud: false,
        };
        assert!(config.ensure_crud_enabled().is_err());

        let config = AppConfig {
            enable_crud: true,
            ..config
        };
        assert!(config.ensure_crud_enabled().is_ok());
    }
}
