//! Layout and viewer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LayoutError;

/// Environment variable overriding [`ViewerConfig::server_url`].
pub const SERVER_ENV: &str = "TALKMAP_SERVER";

/// Geometry and ring-packing parameters for one radial map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Capacity of the (virtual) ring 0 that ring capacities grow from.
    pub base_capacity: usize,
    /// Extra capacity per ring level.
    pub level_growth: usize,
    /// Radius of the topic node.
    pub central_radius: f32,
    /// Radius of every recording node.
    pub child_radius: f32,
    /// Ring spacing in multiples of `child_radius`.
    pub ring_spacing: f32,
    /// Topic node position before re-basing.
    pub center_x: f32,
    pub center_y: f32,
    /// Baseline of the topic label, in canvas coordinates.
    pub label_y: f32,
    pub label_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_capacity: 8,
            level_growth: 4,
            central_radius: 75.0,
            child_radius: 50.0,
            ring_spacing: 2.5,
            center_x: 400.0,
            center_y: 300.0,
            label_y: 20.0,
            label_font_size: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Smaller nodes for dense boards with many topics open at once.
    pub fn compact() -> Self {
        Self {
            central_radius: 40.0,
            child_radius: 24.0,
            label_font_size: 14.0,
            ..Default::default()
        }
    }

    /// Reject configurations the engine cannot lay out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.base_capacity == 0 && self.level_growth == 0 {
            return Err(LayoutError::InvalidInput(
                "base_capacity and level_growth are both zero".to_string(),
            ));
        }
        for (name, value) in [
            ("central_radius", self.central_radius),
            ("child_radius", self.child_radius),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidInput(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(LayoutError::InvalidInput(format!(
                "center must be finite, got ({}, {})",
                self.center_x, self.center_y
            )));
        }
        Ok(())
    }
}

/// Errors loading a viewer configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Settings for the desktop viewer and the export command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL of the talk server.
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub dark_mode: bool,
    pub layout: LayoutConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:15000".to_string(),
            request_timeout_secs: 15,
            dark_mode: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Resolve the effective config: file (if any), then `TALKMAP_SERVER`,
    /// then an explicit server override.
    pub fn load(path: Option<&Path>, server: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(SERVER_ENV) {
            if !url.trim().is_empty() {
                log::debug!("server url from {}: {}", SERVER_ENV, url);
                config.server_url = url;
            }
        }
        if let Some(url) = server {
            config.server_url = url.to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_capacity, 8);
        assert_eq!(config.level_growth, 4);
    }

    #[test]
    fn compact_layout_is_valid() {
        let config = LayoutConfig::compact();
        assert!(config.validate().is_ok());
        assert!(config.child_radius < LayoutConfig::default().child_radius);
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = LayoutConfig {
            base_capacity: 0,
            level_growth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LayoutError::InvalidInput(_))));
    }

    #[test]
    fn non_positive_radius_rejected() {
        let config = LayoutConfig {
            child_radius: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LayoutConfig {
            central_radius: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn viewer_config_partial_json() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "dark_mode": true, "layout": { "child_radius": 30.0 } }"#)
                .unwrap();
        assert!(config.dark_mode);
        assert_eq!(config.layout.child_radius, 30.0);
        assert_eq!(config.layout.central_radius, 75.0);
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn load_from_file_with_server_override() {
        let dir = std::env::temp_dir().join(format!("talkmap-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("viewer.json");
        std::fs::write(&path, r#"{ "request_timeout_secs": 3 }"#).unwrap();

        let config = ViewerConfig::load(Some(&path), Some("http://talks.local:8080")).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.server_url, "http://talks.local:8080");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = std::env::temp_dir().join(format!("talkmap-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("viewer.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ViewerConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("viewer.json"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
