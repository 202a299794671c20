use std::env;
use std::path::PathBuf;

use homefront_core::calendar::{ExpandOptions, FallbackPolicy, DEFAULT_MAX_ITERATIONS};

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cursor step cap per recurring entry (default: 500)
    pub max_iterations: u32,
    /// Drop recurring entries with no occurrence in the window instead of
    /// showing their definition (default: false)
    pub strict_window: bool,
    /// Entries file used when `--entries` is not given (default: "entries.json")
    pub entries_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOMEFRONT_MAX_ITERATIONS` - Iteration cap (default: 500)
    /// - `HOMEFRONT_STRICT_WINDOW` - `true`/`1` to enable strict windows (default: false)
    /// - `HOMEFRONT_ENTRIES_PATH` - Entries file path (default: "entries.json")
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_iterations: lookup("HOMEFRONT_MAX_ITERATIONS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_ITERATIONS),
            strict_window: lookup("HOMEFRONT_STRICT_WINDOW")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            entries_path: lookup("HOMEFRONT_ENTRIES_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("entries.json")),
        }
    }

    /// Expansion options derived from this configuration.
    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            max_iterations: self.max_iterations,
            fallback: if self.strict_window {
                FallbackPolicy::Strict
            } else {
                FallbackPolicy::Definition
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.max_iterations, 500);
        assert!(!config.strict_window);
        assert_eq!(config.entries_path, PathBuf::from("entries.json"));
        assert_eq!(config.expand_options(), ExpandOptions::default());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = config_from(&[
            ("HOMEFRONT_MAX_ITERATIONS", "50"),
            ("HOMEFRONT_STRICT_WINDOW", "TRUE"),
            ("HOMEFRONT_ENTRIES_PATH", "/tmp/family.json"),
        ]);

        assert_eq!(config.max_iterations, 50);
        assert!(config.strict_window);
        assert_eq!(config.entries_path, PathBuf::from("/tmp/family.json"));

        let options = config.expand_options();
        assert_eq!(options.max_iterations, 50);
        assert_eq!(options.fallback, FallbackPolicy::Strict);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[
            ("HOMEFRONT_MAX_ITERATIONS", "lots"),
            ("HOMEFRONT_STRICT_WINDOW", "maybe"),
            ("HOMEFRONT_ENTRIES_PATH", "  "),
        ]);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_iterations_falls_back() {
        let config = config_from(&[("HOMEFRONT_MAX_ITERATIONS", "0")]);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
