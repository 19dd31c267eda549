// src/config/mod.rs

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Search Configuration
    // Collation for title substring search. SQLite's default LIKE is
    // case-insensitive for ASCII; flipping this switches to byte matching.
    pub title_search_case_insensitive: bool,

    // ── Logging Configuration
    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => match val.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            database_url: env_var_or("DATABASE_URL", "sqlite:./organizador.db".to_string()),
            sqlite_max_connections: env_var_or("ORG_SQLITE_MAX_CONNECTIONS", 10),
            host: env_var_or("ORG_HOST", "0.0.0.0".to_string()),
            port: env_var_or("ORG_PORT", 3000),
            title_search_case_insensitive: env_var_or("ORG_TITLE_SEARCH_CASE_INSENSITIVE", true),
            log_level: env_var_or("ORG_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env();

        assert!(!config.database_url.is_empty());
        assert!(config.sqlite_max_connections > 0);
        assert!(config.title_search_case_insensitive);
    }

    #[test]
    fn test_bind_address() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            sqlite_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 3000,
            title_search_case_insensitive: true,
            log_level: "info".to_string(),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }
}
