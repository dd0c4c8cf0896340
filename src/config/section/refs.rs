//! `[refs]` section configuration.
//!
//! ```toml
//! [refs]
//! not_found_url = "/404/"
//! error_level = "warning"
//! ```

use serde::{Deserialize, Serialize};

/// Severity of a `REF_NOT_FOUND` diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    #[default]
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefsConfig {
    /// Link emitted in place of an unresolvable reference.
    pub not_found_url: String,
    pub error_level: ErrorLevel,
}

impl Default for RefsConfig {
    fn default() -> Self {
        Self {
            not_found_url: "#ref-not-found".into(),
            error_level: ErrorLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let config: RefsConfig = toml::from_str(r#"error_level = "warning""#).unwrap();
        assert_eq!(config.error_level, ErrorLevel::Warning);
        assert_eq!(config.not_found_url, "#ref-not-found");
    }

    #[test]
    fn test_reject_unknown_level() {
        assert!(toml::from_str::<RefsConfig>(r#"error_level = "fatal""#).is_err());
    }
}
