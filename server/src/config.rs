use anyhow::{Context, Result};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub request_body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: split_origins(DEFAULT_CORS_ORIGINS),
            request_body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cors_allowed_origins = split_origins(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into()),
        );

        let request_body_limit = match lookup("REQUEST_BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid REQUEST_BODY_LIMIT_BYTES {raw:?}"))?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(Self {
            cors_allowed_origins,
            request_body_limit,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
