//! Application settings.
//!
//! Settings come from YAML. Every key is optional and falls back to the
//! built-in default, so an empty document yields [`Config::default`].

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_PLACEHOLDER_IMAGES: usize = 5;
pub const DEFAULT_CROP_ASPECT_RATIO: f64 = 16.0 / 9.0;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    IoError {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid config value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of bundled placeholder images cycled through for recipes
    /// without a photo
    pub placeholder_images: usize,
    /// Width / height ratio the photo cropper opens with
    pub crop_aspect_ratio: f64,
    /// `tracing` filter directives, e.g. `"info"` or `"recipe_box=debug"`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            placeholder_images: DEFAULT_PLACEHOLDER_IMAGES,
            crop_aspect_ratio: DEFAULT_CROP_ASPECT_RATIO,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        debug!(%path, "loading config");
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Install the stderr log subscriber using [`Config::log_filter`].
    ///
    /// Returns false if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        crate::logging::init_logging(&self.log_filter)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder_images == 0 {
            return Err(ConfigError::InvalidValue {
                key: "placeholder_images",
                message: "must be at least 1".to_string(),
            });
        }
        if !(self.crop_aspect_ratio.is_finite() && self.crop_aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "crop_aspect_ratio",
                message: format!("must be positive, got {}", self.crop_aspect_ratio),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str("placeholder_images: 3").unwrap();
        assert_eq!(config.placeholder_images, 3);
        assert_eq!(config.crop_aspect_ratio, DEFAULT_CROP_ASPECT_RATIO);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_full_yaml() {
        let config = Config::from_yaml_str(indoc! {r#"
            placeholder_images: 8
            crop_aspect_ratio: 1.5
            log_filter: recipe_box=debug
        "#})
        .unwrap();
        assert_eq!(config.placeholder_images, 8);
        assert_eq!(config.crop_aspect_ratio, 1.5);
        assert_eq!(config.log_filter, "recipe_box=debug");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_yaml_str("placeholder_images: 0"),
            Err(ConfigError::InvalidValue {
                key: "placeholder_images",
                ..
            })
        ));
        assert!(matches!(
            Config::from_yaml_str("crop_aspect_ratio: -2"),
            Err(ConfigError::InvalidValue {
                key: "crop_aspect_ratio",
                ..
            })
        ));
        assert!(matches!(
            Config::from_yaml_str("placeholder_images: [1, 2]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let temp_dir_path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        let path = temp_dir_path.join("recipe-box.yaml");
        fs::write(&path, "crop_aspect_ratio: 1.0\n").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.crop_aspect_ratio, 1.0);
    }

    #[test]
    fn test_init_logging_uses_log_filter() {
        let config = Config::from_yaml_str("log_filter: recipe_box=debug").unwrap();
        config.init_logging();
        assert!(!config.init_logging());
        assert!(tracing::enabled!(
            target: "recipe_box::config",
            tracing::Level::DEBUG
        ));
    }

    #[test]
    fn test_from_missing_path() {
        let result = Config::from_path(Utf8Path::new("/nonexistent/recipe-box.yaml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
