//! Environment-driven editor configuration.

use std::env;
use std::path::PathBuf;

use crate::types::BlockColor;

/// Default location of the layout store document.
pub const DEFAULT_STORE_PATH: &str = "block-layouts.json";
/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub store_path: PathBuf,
    /// Log file; logging stays off when unset since the terminal is in raw mode.
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
    pub color: BlockColor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            color: BlockColor::default(),
        }
    }
}

impl EditorConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let store_path = var("BLOCK_LAYOUT_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let log_path = var("BLOCK_LAYOUT_LOG_PATH").map(PathBuf::from);

        let log_filter = var("BLOCK_LAYOUT_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let color = var("BLOCK_LAYOUT_COLOR")
            .and_then(|s| BlockColor::parse(&s))
            .unwrap_or_default();

        Self {
            store_path,
            log_path,
            log_filter,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(EditorConfig::from_lookup(lookup(&[])), EditorConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("BLOCK_LAYOUT_STORE_PATH", "/tmp/layouts.json"),
            ("BLOCK_LAYOUT_LOG_PATH", " /tmp/editor.log "),
            ("BLOCK_LAYOUT_LOG", "block_layout_core=debug"),
            ("BLOCK_LAYOUT_COLOR", "#4caf50"),
        ]));
        assert_eq!(config.store_path, PathBuf::from("/tmp/layouts.json"));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/editor.log")));
        assert_eq!(config.log_filter, "block_layout_core=debug");
        assert_eq!(config.color, BlockColor::Green);
    }

    #[test]
    fn blank_and_invalid_values_fall_back() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("BLOCK_LAYOUT_LOG_PATH", "   "),
            ("BLOCK_LAYOUT_COLOR", "mauve"),
        ]));
        assert_eq!(config.log_path, None);
        assert_eq!(config.color, BlockColor::Red);
    }

    #[test]
    fn from_env_does_not_panic() {
        let _config = EditorConfig::from_env();
    }
}
