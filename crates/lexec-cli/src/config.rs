//! # Engine Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty file (or no file) is valid.
//!
//! ```yaml
//! remission:
//!   include_unapproved: false
//!   zero_denominator: reject   # reject | no_forfeiture | full_forfeiture
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use lexec_state::LedgerOptions;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub remission: LedgerOptions,
}

impl EngineConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid engine configuration")
    }

    /// Load configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// Ledger options with command-line overrides applied.
    pub fn ledger_options(&self, include_unapproved: bool) -> LedgerOptions {
        LedgerOptions {
            include_unapproved: self.remission.include_unapproved || include_unapproved,
            ..self.remission
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexec_state::ZeroDenominatorPolicy;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EngineConfig::from_yaml("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::from_yaml("\n  \n").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "remission:\n  include_unapproved: true\n  zero_denominator: no_forfeiture\n";
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert!(config.remission.include_unapproved);
        assert_eq!(
            config.remission.zero_denominator,
            ZeroDenominatorPolicy::NoForfeiture
        );
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = EngineConfig::from_yaml("remission:\n  include_unapproved: true\n").unwrap();
        assert_eq!(config.remission.zero_denominator, ZeroDenominatorPolicy::Reject);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(EngineConfig::from_yaml("remision: {}\n").is_err());
        assert!(EngineConfig::from_yaml("remission:\n  zero_denominator: ignore\n").is_err());
    }

    #[test]
    fn test_flag_can_only_widen() {
        let config = EngineConfig::from_yaml("remission:\n  include_unapproved: true\n").unwrap();
        assert!(config.ledger_options(false).include_unapproved);
        assert!(EngineConfig::default().ledger_options(true).include_unapproved);
        assert!(!EngineConfig::default().ledger_options(false).include_unapproved);
    }

    #[test]
    fn test_missing_path_is_default() {
        assert_eq!(EngineConfig::load(None).unwrap(), EngineConfig::default());
    }
}
