/// Render and scene configuration
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Largest image field the loader will fill
pub const MAX_FIELD_WIDTH: usize = 256;
pub const MAX_FIELD_HEIGHT: usize = 256;

/// Which coordinate a `ScaleZ` operation multiplies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZScale {
    /// Multiply Y, matching scene scripts written for the crate demo
    Legacy,
    /// Multiply Z
    Depth,
}

impl Default for ZScale {
    fn default() -> Self {
        ZScale::Legacy
    }
}

/// Fixed bounds of a scene, set once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLimits {
    pub objects: usize,
    pub images: usize,
    pub op_slots: usize,
    pub field_width: usize,
    pub field_height: usize,
}

impl SceneLimits {
    /// Clamp the image field to the supported maximum
    pub fn normalized(self) -> Self {
        Self {
            field_width: self.field_width.min(MAX_FIELD_WIDTH),
            field_height: self.field_height.min(MAX_FIELD_HEIGHT),
            ..self
        }
    }
}

impl Default for SceneLimits {
    fn default() -> Self {
        Self {
            objects: 1,
            images: 1,
            op_slots: 128,
            field_width: MAX_FIELD_WIDTH,
            field_height: MAX_FIELD_HEIGHT,
        }
    }
}

/// Canvas size, camera constants and scene bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Distance used by the perspective divide
    pub perspective: f32,
    /// Far bound; points with z at or beyond it are culled
    pub camera_lens: f32,
    /// Near bound (negative); points with z at or before it are culled
    pub camera_distance: f32,
    pub z_scale: ZScale,
    pub limits: SceneLimits,
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: RenderConfig = serde_json::from_str(text)?;
        config.limits = config.limits.normalized();
        Ok(config)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 640,
            canvas_height: 400,
            perspective: 350.0,
            camera_lens: 200.0,
            camera_distance: -200.0,
            z_scale: ZScale::default(),
            limits: SceneLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_crate_demo() {
        let config = RenderConfig::default();
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.perspective, 350.0);
        assert_eq!(config.camera_lens, 200.0);
        assert_eq!(config.camera_distance, -200.0);
        assert_eq!(config.z_scale, ZScale::Legacy);
        assert_eq!(config.limits.op_slots, 128);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            RenderConfig::from_json_str(r#"{ "canvas_width": 80, "z_scale": "depth" }"#).unwrap();
        assert_eq!(config.canvas_width, 80);
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.z_scale, ZScale::Depth);
        assert_eq!(config.limits, SceneLimits::default());
    }

    #[test]
    fn test_field_is_clamped() {
        let config = RenderConfig::from_json_str(
            r#"{ "limits": { "field_width": 1024, "field_height": 16 } }"#,
        )
        .unwrap();
        assert_eq!(config.limits.field_width, MAX_FIELD_WIDTH);
        assert_eq!(config.limits.field_height, 16);
        assert_eq!(config.limits.objects, 1);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "perspective": 500.0 }}"#).unwrap();
        let config = RenderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.perspective, 500.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            RenderConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
