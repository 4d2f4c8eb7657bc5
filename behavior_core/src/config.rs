//! Profile configuration: reaction-time breakpoints and radar axes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// Traits plotted on the radar profile, in axis order.
pub const CANONICAL_TRAITS: [&str; 4] = ["impulsif", "protecteur", "pragmatique", "suiveur"];

/// Configuration for deriving a behavioral report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Ordered radar axes. Other traits are still counted, just not plotted.
    pub canonical_traits: Vec<String>,

    /// Average response times below this are instinctive.
    pub fast_threshold_secs: f64,

    /// Average response times at or above this are hesitant.
    pub hesitant_threshold_secs: f64,

    /// How many top traits to report as dominant.
    pub dominant_trait_count: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            canonical_traits: CANONICAL_TRAITS.iter().map(|t| t.to_string()).collect(),
            fast_threshold_secs: 5.0,
            hesitant_threshold_secs: 15.0,
            dominant_trait_count: 3,
        }
    }
}

impl ProfileConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Check the breakpoints are ordered and the radar axes are distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (fast, hesitant) = (self.fast_threshold_secs, self.hesitant_threshold_secs);

        if !fast.is_finite() || !hesitant.is_finite() || fast < 0.0 {
            return Err(invalid(format!(
                "thresholds must be finite and non-negative (fast={}, hesitant={})",
                fast, hesitant
            )));
        }
        if fast >= hesitant {
            return Err(invalid(format!(
                "fast threshold {} must be below hesitant threshold {}",
                fast, hesitant
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.canonical_traits.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(invalid(format!("canonical trait '{}' listed twice", dup)));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProfileConfig::default();
        assert_eq!(config.canonical_traits, CANONICAL_TRAITS);
        assert_eq!(config.fast_threshold_secs, 5.0);
        assert_eq!(config.hesitant_threshold_secs, 15.0);
        assert_eq!(config.dominant_trait_count, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ProfileConfig::from_toml_str("dominant_trait_count = 2").unwrap();
        assert_eq!(config.dominant_trait_count, 2);
        assert_eq!(config.fast_threshold_secs, 5.0);
        assert_eq!(config.canonical_traits.len(), 4);
    }

    #[test]
    fn test_custom_axes() {
        let config = ProfileConfig::from_toml_str(
            r#"
            canonical_traits = ["calm", "bold", "careful"]
            fast_threshold_secs = 2.5
            hesitant_threshold_secs = 8.0
            "#,
        )
        .unwrap();

        assert_eq!(config.canonical_traits, vec!["calm", "bold", "careful"]);
        assert_eq!(config.fast_threshold_secs, 2.5);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let err = ProfileConfig::from_toml_str(
            "fast_threshold_secs = 20.0\nhesitant_threshold_secs = 10.0",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_duplicate_axes() {
        let config = ProfileConfig {
            canonical_traits: vec!["calm".into(), "calm".into()],
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("'calm'"));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = ProfileConfig::from_toml_str("dominant_trait_count = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
