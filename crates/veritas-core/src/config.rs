// crates/veritas-core/src/config.rs

use serde::Deserialize;

use crate::error::VeritasError;

/// Tunable parameters for validation, consensus, and reputation.
///
/// Every field has a default so a partial (or absent) config file still
/// yields a working configuration. All reputation amounts are expressed as
/// positive magnitudes; the ledger applies the sign.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Votes required before consensus evaluation is triggered.
    #[serde(default = "default_min_validators_per_content")]
    pub min_validators_per_content: usize,

    /// Percentage of accurate votes (0.0-100.0) at or above which content
    /// is approved.
    #[serde(default = "default_consensus_threshold_percent")]
    pub consensus_threshold_percent: f64,

    /// Reputation granted to newly registered validators, and assumed for
    /// validators the ledger has never seen.
    #[serde(default = "default_initial_reputation")]
    pub initial_reputation: f64,

    /// Reputation gained for voting with the consensus outcome.
    #[serde(default = "default_reputation_gain_correct")]
    pub reputation_gain_correct: f64,

    /// Reputation lost for voting against the consensus outcome.
    #[serde(default = "default_reputation_loss_incorrect")]
    pub reputation_loss_incorrect: f64,

    /// Reputation lost when a validator is flagged for malicious activity.
    #[serde(default = "default_reputation_loss_malicious")]
    pub reputation_loss_malicious: f64,

    /// Minimum reputation a validator needs to be selected for review panels.
    #[serde(default = "default_min_reputation_for_selection")]
    pub min_reputation_for_selection: f64,
}

fn default_min_validators_per_content() -> usize {
    3
}

fn default_consensus_threshold_percent() -> f64 {
    75.0
}

fn default_initial_reputation() -> f64 {
    100.0
}

fn default_reputation_gain_correct() -> f64 {
    5.0
}

fn default_reputation_loss_incorrect() -> f64 {
    10.0
}

fn default_reputation_loss_malicious() -> f64 {
    20.0
}

fn default_min_reputation_for_selection() -> f64 {
    50.0
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_validators_per_content: default_min_validators_per_content(),
            consensus_threshold_percent: default_consensus_threshold_percent(),
            initial_reputation: default_initial_reputation(),
            reputation_gain_correct: default_reputation_gain_correct(),
            reputation_loss_incorrect: default_reputation_loss_incorrect(),
            reputation_loss_malicious: default_reputation_loss_malicious(),
            min_reputation_for_selection: default_min_reputation_for_selection(),
        }
    }
}

impl ValidationConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: &std::path::Path) -> Result<Self, VeritasError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| VeritasError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&raw)
            .map_err(|e| VeritasError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.min_validators_per_content, 3);
        assert_eq!(config.consensus_threshold_percent, 75.0);
        assert_eq!(config.initial_reputation, 100.0);
        assert_eq!(config.reputation_gain_correct, 5.0);
        assert_eq!(config.reputation_loss_incorrect, 10.0);
        assert_eq!(config.reputation_loss_malicious, 20.0);
        assert_eq!(config.min_reputation_for_selection, 50.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ValidationConfig = toml::from_str(
            r#"
            min_validators_per_content = 5
            consensus_threshold_percent = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(config.min_validators_per_content, 5);
        assert_eq!(config.consensus_threshold_percent, 60.0);
        // Everything else falls back.
        assert_eq!(config.initial_reputation, 100.0);
        assert_eq!(config.min_reputation_for_selection, 50.0);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: ValidationConfig = toml::from_str("").unwrap();
        assert_eq!(config.min_validators_per_content, 3);
        assert_eq!(config.reputation_loss_malicious, 20.0);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("veritas_config_{}.toml", uuid::Uuid::now_v7()));
        std::fs::write(&path, "consensus_threshold_percent = 80.0\n").unwrap();

        let config = ValidationConfig::load(&path).unwrap();
        assert_eq!(config.consensus_threshold_percent, 80.0);
        assert_eq!(config.min_validators_per_content, 3);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let path = std::env::temp_dir().join("veritas_config_does_not_exist.toml");
        let err = ValidationConfig::load(&path).unwrap_err();
        assert!(matches!(err, VeritasError::Config(_)));
    }
}
