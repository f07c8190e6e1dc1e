use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a workable default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_path: PathBuf,
    pub pdflatex_bin: String,
    pub temp_dir: PathBuf,
    pub compile_timeout_secs: u64,
    pub compile_concurrency: usize,
    pub temp_max_age_minutes: u64,
    /// Comma-separated origin list; `None` means permissive (dev).
    pub cors_allowed_origins: Option<Vec<String>>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            store_path: PathBuf::from(env_or("RESUME_STORE_PATH", "./data/resume.json")),
            pdflatex_bin: env_or("PDFLATEX_BIN", "pdflatex"),
            temp_dir: PathBuf::from(env_or("PDF_TEMP_DIR", "./temp")),
            compile_timeout_secs: env_or("PDF_COMPILE_TIMEOUT_SECS", "15")
                .parse::<u64>()
                .context("PDF_COMPILE_TIMEOUT_SECS must be a number of seconds")?,
            compile_concurrency: env_or("PDF_COMPILE_CONCURRENCY", "2")
                .parse::<usize>()
                .context("PDF_COMPILE_CONCURRENCY must be a positive integer")?,
            temp_max_age_minutes: env_or("PDF_TEMP_MAX_AGE_MINUTES", "30")
                .parse::<u64>()
                .context("PDF_TEMP_MAX_AGE_MINUTES must be a number of minutes")?,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS").ok().map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
