//! Configuration loading and representation.
//!
//! Everything comes from environment variables with dev-friendly defaults.

use std::path::PathBuf;

use mise_inventory::EXPIRING_SOON_DAYS;
use mise_observability::LogFormat;

pub const ENV_DATA_DIR: &str = "MISE_DATA_DIR";
pub const ENV_EXPIRING_SOON_DAYS: &str = "MISE_EXPIRING_SOON_DAYS";
pub const ENV_LOG_FORMAT: &str = "MISE_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfraConfig {
    /// Directory holding the JSON-file collections.
    pub data_dir: PathBuf,
    pub expiring_soon_days: i64,
    pub log_format: LogFormat,
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            expiring_soon_days: EXPIRING_SOON_DAYS,
            log_format: LogFormat::Json,
        }
    }
}

/// A parsed configuration plus the fallbacks applied while parsing.
///
/// Parsing runs before logging is initialized, so the warnings are held here
/// until a subscriber exists to receive them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: InfraConfig,
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Emit the collected fallback warnings. Call after logging is initialized.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}

impl InfraConfig {
    pub fn from_env() -> LoadedConfig {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Bad values fall back to the
    /// default and are reported in [`LoadedConfig::warnings`] rather than
    /// failing startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoadedConfig {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let expiring_soon_days = match lookup(ENV_EXPIRING_SOON_DAYS) {
            None => defaults.expiring_soon_days,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days >= 0 => days,
                _ => {
                    warnings.push(format!(
                        "{ENV_EXPIRING_SOON_DAYS}={raw:?} is not a non-negative integer; using default {}",
                        defaults.expiring_soon_days
                    ));
                    defaults.expiring_soon_days
                }
            },
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            None => defaults.log_format,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warnings.push(format!("{ENV_LOG_FORMAT}: {e}; using json"));
                defaults.log_format
            }),
        };

        LoadedConfig {
            config: Self {
                data_dir,
                expiring_soon_days,
                log_format,
            },
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> LoadedConfig {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        InfraConfig::from_lookup(|key| env.get(key).cloned())
    }

    fn config(pairs: &[(&str, &str)]) -> InfraConfig {
        load(pairs).config
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let loaded = load(&[]);
        assert_eq!(loaded.config, InfraConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn reads_all_values() {
        let cfg = config(&[
            (ENV_DATA_DIR, "/var/lib/mise"),
            (ENV_EXPIRING_SOON_DAYS, "7"),
            (ENV_LOG_FORMAT, "pretty"),
        ]);
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/mise"));
        assert_eq!(cfg.expiring_soon_days, 7);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = config(&[(ENV_EXPIRING_SOON_DAYS, "-2"), (ENV_LOG_FORMAT, "xml"), (ENV_DATA_DIR, " ")]);
        assert_eq!(cfg, InfraConfig::default());
    }

    #[test]
    fn fallbacks_are_held_until_logging_is_up() {
        let loaded = load(&[(ENV_EXPIRING_SOON_DAYS, "-2"), (ENV_LOG_FORMAT, "xml")]);
        assert_eq!(loaded.warnings.len(), 2);
        assert!(loaded.warnings[0].contains(ENV_EXPIRING_SOON_DAYS));
        assert!(loaded.warnings[1].contains(ENV_LOG_FORMAT));

        mise_observability::init_test();
        loaded.log_warnings();
    }
}
