//! YAML configuration.
//!
//! Only `color_scale` is required; every other section falls back to its
//! defaults when absent.
//!
//! ```yaml
//! color_scale:
//!   gradient: viridis
//!   min_value: 0
//!   max_value: 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::colormap::{Colormap, DEFAULT_RESOLUTION, GradientSpec};
use crate::common::error::{Error, Result};
use crate::legend::Orientation;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub color_scale: ColorScaleConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub legend: LegendConfig,
    /// Also color shapes nested in group shapes
    #[serde(default)]
    pub match_grouped_shapes: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorScaleConfig {
    pub gradient: GradientSpec,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of lookup-table entries the gradient is resolved into
    #[serde(default = "ColorScaleConfig::default_resolution")]
    pub resolution: usize,
}
impl ColorScaleConfig {
    fn default_resolution() -> usize {
        DEFAULT_RESOLUTION
    }

    /// Resolve the gradient into a colormap.
    pub fn colormap(&self) -> Result<Colormap> {
        Colormap::from_spec(&self.gradient, self.resolution)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    #[serde(default = "DataConfig::default_key_column")]
    pub key_column: String,
    #[serde(default = "DataConfig::default_value_column")]
    pub value_column: String,
}
impl DataConfig {
    fn default_key_column() -> String {
        "Gene".to_string()
    }

    fn default_value_column() -> String {
        "Value".to_string()
    }
}
impl Default for DataConfig {
    fn default() -> Self {
        Self {
            key_column: Self::default_key_column(),
            value_column: Self::default_value_column(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Directory the colorbar images are written to
    pub directory: PathBuf,
    /// Which colorbar image is placed on the slides
    pub orientation: Orientation,
    pub left_inches: f64,
    pub top_inches: f64,
    /// Picture height on the slide; the width follows the image aspect ratio
    pub height_inches: f64,
}
impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            orientation: Orientation::Vertical,
            left_inches: 9.5,
            top_inches: 3.0,
            height_inches: 2.0,
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_saphyr::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&text)?;
        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let scale = &self.color_scale;
        if !scale.min_value.is_finite() || !scale.max_value.is_finite() {
            return Err(Error::Config("color_scale min_value and max_value must be finite".to_string()));
        }
        if scale.min_value > scale.max_value {
            warn!(
                min = scale.min_value,
                max = scale.max_value,
                "color_scale min_value is greater than max_value, the scale runs backwards"
            );
        }
        if !(self.legend.height_inches > 0.0) {
            return Err(Error::Config("legend height_inches must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColorStop;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_yaml("color_scale:\n  gradient: viridis\n  min_value: 0\n  max_value: 10\n").unwrap();

        assert_eq!(config.color_scale.gradient, GradientSpec::Named("viridis".into()));
        assert_eq!(config.color_scale.min_value, 0.0);
        assert_eq!(config.color_scale.max_value, 10.0);
        assert_eq!(config.color_scale.resolution, 100);
        assert_eq!(config.data, DataConfig::default());
        assert_eq!(config.legend, LegendConfig::default());
        assert!(!config.match_grouped_shapes);
    }

    #[test]
    fn test_full_config() {
        let yaml = r##"
color_scale:
  gradient:
    - color: "#2166AC"
    - color: white
    - color: "#B2182B"
  min_value: -2.5
  max_value: 2.5
  resolution: 256
data:
  key_column: Symbol
legend:
  directory: legends
  orientation: horizontal
  top_inches: 0.5
match_grouped_shapes: true
"##;
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(
            config.color_scale.gradient,
            GradientSpec::Stops(vec![
                ColorStop::new("#2166AC"),
                ColorStop::new("white"),
                ColorStop::new("#B2182B")
            ])
        );
        assert_eq!(config.color_scale.resolution, 256);
        assert_eq!(config.data.key_column, "Symbol");
        assert_eq!(config.data.value_column, "Value");
        assert_eq!(config.legend.directory, PathBuf::from("legends"));
        assert_eq!(config.legend.orientation, Orientation::Horizontal);
        assert_eq!(config.legend.top_inches, 0.5);
        assert_eq!(config.legend.left_inches, 9.5);
        assert!(config.match_grouped_shapes);
        assert_eq!(config.color_scale.colormap().unwrap().len(), 256);
    }

    #[test]
    fn test_missing_keys() {
        assert!(matches!(
            Config::from_yaml("color_scale:\n  gradient: viridis\n  min_value: 0\n"),
            Err(Error::Config(msg)) if msg.contains("max_value")
        ));
        assert!(matches!(Config::from_yaml("legend: {}\n"), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
