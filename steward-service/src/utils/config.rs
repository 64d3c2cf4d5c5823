// steward-service/src/utils/config.rs
use crate::models::VisibilityFallback;
use log::warn;
use std::env;
use std::path::PathBuf;

const DEFAULT_ADDRESS: &str = "127.0.0.1:9090";
const DEFAULT_STORAGE_PATH: &str = "./storage";

// Runtime settings, read from the environment (and .env via dotenv)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_address: String,
    pub storage_path: PathBuf,
    pub visibility_fallback: VisibilityFallback,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let visibility_fallback = match lookup("VISIBILITY_FALLBACK") {
            Some(raw) => VisibilityFallback::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown VISIBILITY_FALLBACK value '{}', using allow", raw);
                VisibilityFallback::Allow
            }),
            None => VisibilityFallback::default(),
        };

        Self {
            server_address: lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            storage_path: lookup("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH)),
            visibility_fallback,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.server_address, "127.0.0.1:9090");
        assert_eq!(config.storage_path, PathBuf::from("./storage"));
        assert_eq!(config.visibility_fallback, VisibilityFallback::Allow);
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_ADDRESS", "0.0.0.0:8080"),
            ("STORAGE_PATH", "/var/lib/steward"),
            ("VISIBILITY_FALLBACK", "deny"),
            ("CORS_ORIGIN", "https://admin.example.org"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));
        assert_eq!(config.server_address, "0.0.0.0:8080");
        assert_eq!(config.storage_path, PathBuf::from("/var/lib/steward"));
        assert_eq!(config.visibility_fallback, VisibilityFallback::Deny);
        assert_eq!(config.cors_origin.as_deref(), Some("https://admin.example.org"));
    }

    #[test]
    fn unknown_fallback_value_stays_open() {
        let config = AppConfig::from_lookup(|key| {
            (key == "VISIBILITY_FALLBACK").then(|| "sometimes".to_string())
        });
        assert_eq!(config.visibility_fallback, VisibilityFallback::Allow);
    }
}
