//! Process configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Start with the demonstration records.
    pub seed_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, seed_catalog: true }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `SEED_CATALOG`: `true` (default) / `false`, also `1` / `0`
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            Err(_) => DEFAULT_PORT,
        };
        let seed_catalog = match std::env::var("SEED_CATALOG") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "SEED_CATALOG", value: raw })?,
            Err(_) => true,
        };
        Ok(Self { port, seed_catalog })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
