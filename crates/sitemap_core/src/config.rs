//! Site map configuration.
//!
//! # Responsibility
//! - Hold the tunables that decide palette, placement, zoom and hierarchy.
//! - Load them from JSON and reject values that would break invariants.
//!
//! # Invariants
//! - A validated config has a non-empty palette of valid color tokens.
//! - `0 < zoom.min <= zoom.max` and `zoom.step > 0`.

use crate::geometry::{Point, ZoomLimits};
use crate::import::ImportMode;
use crate::model::color::{default_palette, is_valid_color_token};
use crate::tree::forest::HierarchyMode;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Runtime configuration for one site map store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMapConfig {
    /// Colors new notes are drawn from.
    pub palette: Vec<String>,
    /// Canvas position of notes created from the toolbar.
    pub default_position: Point,
    pub zoom: ZoomLimits,
    pub hierarchy: HierarchyMode,
    pub import_mode: ImportMode,
    /// Simulated latency of the demo import source.
    pub import_latency_ms: u64,
}

impl Default for SiteMapConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            default_position: Point::new(400.0, 200.0),
            zoom: ZoomLimits::default(),
            hierarchy: HierarchyMode::default(),
            import_mode: ImportMode::default(),
            import_latency_ms: 2000,
        }
    }
}

impl SiteMapConfig {
    /// Parses and validates a JSON config. Missing fields use defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(bad) = self
            .palette
            .iter()
            .find(|value| !is_valid_color_token(value))
        {
            return Err(ConfigError::InvalidColor(bad.clone()));
        }

        let ZoomLimits { min, max, step } = self.zoom;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidZoomRange { min, max });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidZoomStep(step));
        }
        Ok(())
    }

    pub fn import_latency(&self) -> Duration {
        Duration::from_millis(self.import_latency_ms)
    }
}

/// Config parse/validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    EmptyPalette,
    InvalidColor(String),
    InvalidZoomRange { min: f64, max: f64 },
    InvalidZoomStep(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::EmptyPalette => write!(f, "palette must contain at least one color"),
            Self::InvalidColor(value) => write!(f, "palette color is not a valid token: `{value}`"),
            Self::InvalidZoomRange { min, max } => {
                write!(f, "zoom range must satisfy 0 < min <= max, got [{min}, {max}]")
            }
            Self::InvalidZoomStep(step) => write!(f, "zoom step must be positive, got {step}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SiteMapConfig};
    use crate::import::ImportMode;
    use crate::tree::forest::HierarchyMode;

    #[test]
    fn default_config_is_valid() {
        SiteMapConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SiteMapConfig::from_json_str(
            r#"{ "hierarchy": "parent_links", "import_mode": "append", "zoom": { "max": 3.0 } }"#,
        )
        .expect("partial config should parse");
        assert_eq!(config.hierarchy, HierarchyMode::ParentLinks);
        assert_eq!(config.import_mode, ImportMode::Append);
        assert_eq!(config.zoom.max, 3.0);
        assert_eq!(config.zoom.min, 0.5);
        assert_eq!(config.palette.len(), 7);
    }

    #[test]
    fn rejects_bad_palette_and_zoom() {
        assert_eq!(
            SiteMapConfig::from_json_str(r#"{ "palette": [] }"#),
            Err(ConfigError::EmptyPalette)
        );
        assert_eq!(
            SiteMapConfig::from_json_str(r##"{ "palette": ["#fff", "teal"] }"##),
            Err(ConfigError::InvalidColor("teal".to_string()))
        );
        assert!(matches!(
            SiteMapConfig::from_json_str(r#"{ "zoom": { "min": 2.0, "max": 1.0 } }"#),
            Err(ConfigError::InvalidZoomRange { .. })
        ));
        assert!(matches!(
            SiteMapConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
