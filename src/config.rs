use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "FICS Agent";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default reasoning model (schema-constrained JSON output with thinking).
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Upper bound on one analysis round trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_THINKING_BUDGET: u32 = 2048;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "fics_agent_lib=info,fics_agent=info,tower_http=info,warn"
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings read from the environment.
#[derive(Clone)]
pub struct Settings {
    /// Credential for the reasoning service. `None` keeps the server up but
    /// every analysis fails with the generic error.
    pub api_key: Option<String>,
    pub model: String,
    pub gemini_base_url: String,
    pub bind_addr: SocketAddr,
    pub timeout_secs: u64,
    pub thinking_budget: u32,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("bind_addr", &self.bind_addr)
            .field("timeout_secs", &self.timeout_secs)
            .field("thinking_budget", &self.thinking_budget)
            .finish()
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (tests inject a map).
    ///
    /// `GEMINI_API_KEY` wins over the legacy `API_KEY`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));
        let model = non_empty("FICS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let gemini_base_url = non_empty("FICS_GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let bind_raw = non_empty("FICS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "FICS_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let timeout_secs = parse_number("FICS_TIMEOUT_SECS", non_empty("FICS_TIMEOUT_SECS"))?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "FICS_TIMEOUT_SECS",
                value: "0".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let thinking_budget =
            parse_number("FICS_THINKING_BUDGET", non_empty("FICS_THINKING_BUDGET"))?
                .unwrap_or(DEFAULT_THINKING_BUDGET);

        Ok(Self {
            api_key,
            model,
            gemini_base_url,
            bind_addr,
            timeout_secs,
            thinking_budget,
        })
    }
}

fn parse_number<T>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key,
            value: value.clone(),
            reason: e.to_string(),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = settings_from(&[]).unwrap();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.timeout_secs, 300);
        assert_eq!(settings.thinking_budget, 2048);
    }

    #[test]
    fn gemini_key_preferred_over_legacy_key() {
        let settings = settings_from(&[("API_KEY", "legacy"), ("GEMINI_API_KEY", "primary")]).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("primary"));

        let settings = settings_from(&[("API_KEY", "legacy"), ("GEMINI_API_KEY", " ")]).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn overrides_are_read() {
        let settings = settings_from(&[
            ("FICS_MODEL", "gemini-2.5-flash"),
            ("FICS_BIND_ADDR", "0.0.0.0:8080"),
            ("FICS_TIMEOUT_SECS", "30"),
            ("FICS_THINKING_BUDGET", "0"),
        ])
        .unwrap();
        assert_eq!(settings.model, "gemini-2.5-flash");
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.thinking_budget, 0);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = settings_from(&[("FICS_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "FICS_BIND_ADDR", .. }
        ));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(settings_from(&[("FICS_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings_from(&[("FICS_TIMEOUT_SECS", "0")]).is_err());
        assert!(settings_from(&[("FICS_THINKING_BUDGET", "-1")]).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let settings = settings_from(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn app_name_is_fics_agent() {
        assert_eq!(APP_NAME, "FICS Agent");
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
