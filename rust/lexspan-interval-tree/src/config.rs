//! Occurrence index configuration.

use lexspan_common::{Result, error::Error};
use serde::{Deserialize, Serialize};

/// Configuration of an [`OccurrenceIndex`](crate::OccurrenceIndex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccurrenceIndexConfig {
    /// Every key must be a single point holding exactly one hit, as in a
    /// document id index. Ranges and repeated keys are rejected.
    pub single_point: bool,
    /// Hit records carry the `(prefix id, term ref)` secondary key.
    /// Occurrences without a prefix id are rejected.
    pub store_secondary: bool,
    /// Maximum number of hit lists the index appends to one key.
    pub max_hits_per_key: usize,
}

impl Default for OccurrenceIndexConfig {
    fn default() -> Self {
        Self {
            single_point: false,
            store_secondary: false,
            max_hits_per_key: usize::MAX,
        }
    }
}

impl OccurrenceIndexConfig {
    /// Configuration of a document id index.
    pub fn document() -> Self {
        Self {
            single_point: true,
            max_hits_per_key: 1,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_hits_per_key == 0 {
            return Err(Error::invalid_arg(
                "max_hits_per_key",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(OccurrenceIndexConfig::default().validate().is_ok());
        assert!(OccurrenceIndexConfig::document().validate().is_ok());
        let config = OccurrenceIndexConfig {
            max_hits_per_key: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OccurrenceIndexConfig =
            serde_json::from_str(r#"{ "store_secondary": true }"#).unwrap();
        assert!(config.store_secondary);
        assert!(!config.single_point);
        assert_eq!(config.max_hits_per_key, usize::MAX);

        let json = serde_json::to_string(&OccurrenceIndexConfig::document()).unwrap();
        let back: OccurrenceIndexConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OccurrenceIndexConfig::document());
    }
}
