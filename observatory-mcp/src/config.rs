//! Server configuration from the environment

use std::env;

use observatory_units::CategoryRegistry;
use tracing::warn;

/// Log filter used when neither OBSERVATORY_LOG nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Category used by `default_units` when the caller names none
pub const DEFAULT_CATEGORY: &str = "length";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// EnvFilter directive string for the stderr logger
    pub log_filter: String,
    pub default_category: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read OBSERVATORY_LOG (falling back to RUST_LOG) and
    /// OBSERVATORY_DEFAULT_CATEGORY
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup("OBSERVATORY_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let default_category = lookup("OBSERVATORY_DEFAULT_CATEGORY")
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        ServerConfig {
            log_filter,
            default_category,
        }
    }

    /// Replace a default category the registry does not know.
    ///
    /// Runs after the subscriber is installed so the warning is visible.
    pub fn checked(mut self, registry: &CategoryRegistry) -> Self {
        if registry.get(&self.default_category).is_none() {
            warn!(
                category = %self.default_category,
                fallback = DEFAULT_CATEGORY,
                "unknown default category"
            );
            self.default_category = DEFAULT_CATEGORY.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), ServerConfig::default());
    }

    #[test]
    fn test_observatory_log_wins_over_rust_log() {
        let c = config(&[("OBSERVATORY_LOG", "debug"), ("RUST_LOG", "warn")]);
        assert_eq!(c.log_filter, "debug");
        let c = config(&[("RUST_LOG", "warn")]);
        assert_eq!(c.log_filter, "warn");
    }

    #[test]
    fn test_default_category() {
        let registry = CategoryRegistry::builtin();
        let c = config(&[("OBSERVATORY_DEFAULT_CATEGORY", "cooking")]).checked(&registry);
        assert_eq!(c.default_category, "cooking");

        let c = config(&[("OBSERVATORY_DEFAULT_CATEGORY", "astrology")]).checked(&registry);
        assert_eq!(c.default_category, "length");
    }
}
