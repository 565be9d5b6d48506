use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub seed_sample_jobs: bool,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: var("PORT")
                .map(|v| {
                    v.trim()
                        .parse::<u16>()
                        .with_context(|| format!("PORT must be a valid port number, got '{v}'"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            seed_sample_jobs: var("SEED_SAMPLE_JOBS")
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(true),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .map(|v| {
                    v.trim()
                        .parse::<usize>()
                        .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{v}'"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("SEED_SAMPLE_JOBS must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
impl Config {
    /// In-memory configuration used by router tests.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            seed_sample_jobs: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
