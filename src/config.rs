use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::model::InvalidPolicy;
use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "BIKE_BRUSH_CONFIG";

/// Engine settings.
///
/// ```json
/// { "invalid_policy": "skip", "dominant_factor_count": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How reducers treat numeric cells that failed to parse.
    pub invalid_policy: InvalidPolicy,
    /// How many factors the correlation ranking reports as dominant.
    pub dominant_factor_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            invalid_policy: InvalidPolicy::Propagate,
            dominant_factor_count: 2,
        }
    }
}

impl EngineConfig {
    /// Read the file named by [`CONFIG_ENV`], or fall back to defaults when
    /// the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dominant_factor_count == 0 {
            return Err(ConfigError::NoDominantFactors);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("bike_brush_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.invalid_policy, InvalidPolicy::Propagate);
        assert_eq!(config.dominant_factor_count, 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = write_temp("partial.json", r#"{ "invalid_policy": "skip" }"#);
        let config = EngineConfig::from_path(&path).unwrap();
        assert_eq!(config.invalid_policy, InvalidPolicy::Skip);
        assert_eq!(config.dominant_factor_count, 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let path = write_temp("broken.json", "{ invalid_policy: ");
        assert!(matches!(
            EngineConfig::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_zero_dominant_factors_rejected() {
        let path = write_temp("zero.json", r#"{ "dominant_factor_count": 0 }"#);
        assert!(matches!(
            EngineConfig::from_path(&path),
            Err(ConfigError::NoDominantFactors)
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("bike_brush_definitely_missing.json");
        assert!(matches!(
            EngineConfig::from_path(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
