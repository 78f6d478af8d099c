//! Colormaps: gradient specifications resolved into lookup tables, and the
//! value-to-color mapping used to fill shapes.
//!
//! # Example
//!
//! ```rust
//! use pathtint::colormap::{Colormap, GradientSpec, map_color};
//!
//! let cmap = Colormap::from_spec(&GradientSpec::Named("viridis".into()), 100)?;
//! assert!(map_color(Some(5.0), 0.0, 10.0, &cmap).is_some());
//! assert!(map_color(None, 0.0, 10.0, &cmap).is_none());
//! # Ok::<(), pathtint::Error>(())
//! ```

pub mod gradient;
pub mod palette;

pub use gradient::ColorStop;
pub use palette::PALETTE_NAMES;

use serde::Deserialize;

use crate::common::RGBColor;
use crate::common::error::{Error, Result};

/// Default number of lookup-table entries.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Normalized positions are scaled by `TOP_SCALE / 100` so that the maximum
/// falls inside the last table entry rather than on its upper edge.
const TOP_SCALE: f64 = 99.0;

/// How a gradient is specified in the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GradientSpec {
    /// A named palette such as `viridis` or `RdBu_r`
    Named(String),
    /// An ordered list of color stops
    Stops(Vec<ColorStop>),
}

/// A gradient resolved into a fixed-size lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    lut: Vec<RGBColor>,
}

impl Colormap {
    /// Resolve `spec` into a table of `resolution` colors.
    pub fn from_spec(spec: &GradientSpec, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(Error::InvalidGradient(format!(
                "resolution must be at least 2, got {}",
                resolution
            )));
        }

        let lut = match spec {
            GradientSpec::Named(name) => palette::sample_named(name, resolution)?,
            GradientSpec::Stops(stops) => gradient::sample_stops(stops, resolution)?,
        };
        Ok(Self { lut })
    }

    /// Build directly from table entries (at least one).
    pub fn from_colors(lut: Vec<RGBColor>) -> Result<Self> {
        if lut.is_empty() {
            return Err(Error::InvalidGradient("empty color table".to_string()));
        }
        Ok(Self { lut })
    }

    /// Color at `t` in [0, 1]: entry `floor(t * len)`, clamped to the table.
    pub fn at(&self, t: f64) -> RGBColor {
        let n = self.lut.len();
        let idx = if t.is_nan() || t <= 0.0 {
            0
        } else {
            ((t * n as f64) as usize).min(n - 1)
        };
        self.lut[idx]
    }

    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    pub fn colors(&self) -> &[RGBColor] {
        &self.lut
    }
}

/// Position of `value` on the color scale.
///
/// None for a missing or NaN value. A degenerate range (`min == max`) puts
/// every value at the midpoint; otherwise the value is clamped to the range
/// and scaled into [0, 0.99].
pub fn normalize(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    let value = value.filter(|v| !v.is_nan())?;
    if min == max {
        return Some(0.5);
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    Some(t * TOP_SCALE / 100.0)
}

/// Fill color for `value`, None when the value is missing.
pub fn map_color(value: Option<f64>, min: f64, max: f64, cmap: &Colormap) -> Option<RGBColor> {
    normalize(value, min, max).map(|t| cmap.at(t))
}
