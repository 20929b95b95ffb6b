//! Engine configuration
//!
//! Loaded from YAML; every section is optional and falls back to defaults.
//!
//! ```yaml
//! history:
//!   default_page_size: 20
//!   max_page_size: 100
//! redaction:
//!   extra_keys: [licenseKey]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use siteconf_core::errors::{ExError, ExErrorKind, Result};
use siteconf_core::{RedactionPolicy, Redactor};

/// Default number of revisions per history page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound applied to requested page sizes
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub history: HistoryConfig,
    pub redaction: RedactionPolicy,
}

impl EngineConfig {
    /// Check page sizes and compile the redaction policy
    ///
    /// # Errors
    ///
    /// `InvalidConfig` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.history.default_page_size == 0 || self.history.max_page_size == 0 {
            return Err(invalid_config("page sizes must be greater than zero"));
        }
        if self.history.default_page_size > self.history.max_page_size {
            return Err(invalid_config(&format!(
                "default_page_size {} exceeds max_page_size {}",
                self.history.default_page_size, self.history.max_page_size
            )));
        }
        Redactor::new(&self.redaction)?;
        Ok(())
    }
}

/// Parse and validate configuration from YAML text
///
/// Empty input yields the defaults.
///
/// # Errors
///
/// `InvalidConfig` for unparseable YAML, unknown fields or failed validation.
pub fn parse_config_str(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig = if content.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| invalid_config(&format!("YAML parse error: {}", e)))?
    };
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// `InvalidConfig` when the file cannot be read or fails [`parse_config_str`].
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        invalid_config(&format!("cannot read {}: {}", path.display(), e)).with_op("config_load")
    })?;
    parse_config_str(&content)
}

fn invalid_config(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("config_parse")
        .with_message(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = parse_config_str("history:\n  max_page_size: 50\n").unwrap();
        assert_eq!(config.history.max_page_size, 50);
        assert_eq!(config.history.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.redaction, RedactionPolicy::default());
    }

    #[test]
    fn test_default_above_max_rejected() {
        let err = parse_config_str("history:\n  default_page_size: 10\n  max_page_size: 5\n")
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_bad_redaction_pattern_rejected() {
        let err = parse_config_str("redaction:\n  value_patterns: ['(oops']\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse_config_str("logging:\n  level: debug\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/siteconf.yaml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.op(), Some("config_load"));
    }
}
