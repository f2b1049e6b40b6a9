//! Engine configuration
//!
//! All fields have defaults, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;
use crate::types::UserRole;

/// Default window length used when a caller gives no start
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Roles counted as cohort members
    pub cohort_roles: Vec<UserRole>,
    pub default_window_days: u32,
    /// Producer instance id stamped on encoded reports
    pub instance_id: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cohort_roles: vec![UserRole::Member],
            default_window_days: DEFAULT_WINDOW_DAYS,
            instance_id: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.cohort_roles.is_empty() {
            return Err(EngineError::Config(
                "cohort_roles must name at least one role".to_string(),
            ));
        }
        if self.default_window_days == 0 {
            return Err(EngineError::Config(
                "default_window_days must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.cohort_roles, vec![UserRole::Member]);
    }

    #[test]
    fn test_partial_override() {
        let config =
            EngineConfig::from_json(r#"{"default_window_days": 7, "instance_id": "dash-1"}"#)
                .unwrap();
        assert_eq!(config.default_window_days, 7);
        assert_eq!(config.instance_id.as_deref(), Some("dash-1"));
        assert_eq!(config.cohort_roles, vec![UserRole::Member]);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(EngineConfig::from_json(r#"{"cohort_roles": []}"#).is_err());
        assert!(EngineConfig::from_json(r#"{"default_window_days": 0}"#).is_err());
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
