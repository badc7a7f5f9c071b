//! Skewer configuration
//!
//! Settings for the demo come from `skewer.toml` in the working directory,
//! with environment variables taking precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skewer_core::Preset;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "skewer.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SkewerConfig {
    pub window: WindowConfig,
    pub shape: ShapeConfig,
    pub colors: ColorConfig,
    pub demo: DemoConfig,
    pub render: RenderConfig,
    /// Extra presets; each one replaces the built-in preset on its trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<Vec<Preset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Baseline polygon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapeConfig {
    /// Defaults to the window center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    pub radius: f64,
    pub sides: usize,
    /// Degrees the baseline is turned about its center after construction.
    pub rotation_offset: f64,
}

/// sRGB byte triples
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub background: [u8; 3],
    pub fill: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Scene to show on startup (transform, static).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Lyon tessellation tolerance for curved shapes, in pixels
    pub tolerance: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Affine Transforms".to_string(),
            width: 600,
            height: 600,
        }
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            center: None,
            radius: 150.0,
            sides: 5,
            rotation_offset: 54.0,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 0],
            fill: [0, 0, 255],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl ShapeConfig {
    /// Center to build the polygon around for a window of the given size.
    pub fn center_for(&self, width: u32, height: u32) -> [f64; 2] {
        self.center
            .unwrap_or([f64::from(width) / 2.0, f64::from(height) / 2.0])
    }
}

impl SkewerConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load `skewer.toml` from the current directory or return defaults.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(CONFIG_FILE)
    }

    /// Merge configuration with environment variables.
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparsable values are skipped.
    pub fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(scene) = lookup("SKEWER_SCENE") {
            self.demo.scene = Some(scene);
        }
        if let Some(title) = lookup("SKEWER_TITLE") {
            self.window.title = title;
        }
        if let Some(val) = parsed(&lookup, "SKEWER_RADIUS") {
            self.shape.radius = val;
        }
        if let Some(val) = parsed(&lookup, "SKEWER_SIDES") {
            self.shape.sides = val;
        }
        if let Some(val) = parsed(&lookup, "SKEWER_ROTATION_OFFSET") {
            self.shape.rotation_offset = val;
        }
    }

    /// Load with environment overrides:
    /// 1. `skewer.toml` (or defaults if not found)
    /// 2. `SKEWER_*` environment variables
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

fn parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = SkewerConfig::default();
        assert_eq!(config.window.title, "Affine Transforms");
        assert_eq!((config.window.width, config.window.height), (600, 600));
        assert_eq!(config.shape.sides, 5);
        assert_eq!(config.shape.rotation_offset, 54.0);
        assert_eq!(config.colors.background, [255, 255, 0]);
        assert!(config.presets.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = SkewerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SkewerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn center_defaults_to_window_middle() {
        let shape = ShapeConfig::default();
        assert_eq!(shape.center_for(600, 400), [300.0, 200.0]);
        let pinned = ShapeConfig {
            center: Some([10.0, 20.0]),
            ..ShapeConfig::default()
        };
        assert_eq!(pinned.center_for(600, 400), [10.0, 20.0]);
    }

    #[test]
    fn test_merge_from() {
        let vars: HashMap<&str, &str> = [
            ("SKEWER_SCENE", "static"),
            ("SKEWER_SIDES", "7"),
            ("SKEWER_RADIUS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = SkewerConfig::default();
        config.merge_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.demo.scene.as_deref(), Some("static"));
        assert_eq!(config.shape.sides, 7);
        assert_eq!(config.shape.radius, 150.0);
    }
}
