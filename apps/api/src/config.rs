use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default, so the server boots on a bare environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub rust_log: String,
    pub frontend_url: Option<String>,
    pub admin_url: Option<String>,
    pub overrides: EnvOverrides,
}

/// Deployment-level overrides for runtime-tunable settings. A captured
/// value wins over the settings file; an unset, empty, or unparseable
/// variable falls through to whatever the file says.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub auto_post_enabled: Option<bool>,
    pub post_interval_minutes: Option<u32>,
    pub humanizer_api_key: Option<String>,
    pub humanizer_api_url: Option<String>,
    pub website_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            data_dir: PathBuf::from(env_opt("DATA_DIR").unwrap_or_else(|| "data".to_string())),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            frontend_url: env_opt("FRONTEND_URL"),
            admin_url: env_opt("ADMIN_URL"),
            overrides: EnvOverrides::capture(),
        })
    }
}

impl EnvOverrides {
    pub fn capture() -> Self {
        EnvOverrides {
            auto_post_enabled: std::env::var("AUTO_POST_ENABLED")
                .ok()
                .map(|v| v == "true" || v == "1"),
            post_interval_minutes: env_opt("POST_INTERVAL_MINUTES")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|n| *n > 0),
            humanizer_api_key: env_opt("HUMANIZER_API_KEY"),
            humanizer_api_url: env_opt("HUMANIZER_API_URL"),
            website_url: env_opt("WEBSITE_URL"),
        }
    }
}

/// Returns the variable's value, treating unset and blank as absent.
fn env_opt(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
