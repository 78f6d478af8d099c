//! Gradients built from explicit color stops.

use colorgrad::{BlendMode, GradientBuilder, LinearGradient};
use serde::Deserialize;

use crate::colormap::palette::sample;
use crate::common::RGBColor;
use crate::common::error::{Error, Result};

/// One stop of an explicit gradient.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorStop {
    /// CSS color name or hex (`#RRGGBB`, `#RGB`)
    pub color: String,
    /// Position in [0, 1]; stops are evenly spaced when no stop has one
    #[serde(default)]
    pub position: Option<f32>,
}

impl ColorStop {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            position: None,
        }
    }

    pub fn at(color: impl Into<String>, position: f32) -> Self {
        Self {
            color: color.into(),
            position: Some(position),
        }
    }
}

/// Check the stop list and return the explicit positions, if any.
fn positions(stops: &[ColorStop]) -> Result<Option<Vec<f32>>> {
    if stops.len() < 2 {
        return Err(Error::InvalidGradient(format!(
            "at least two color stops are required, got {}",
            stops.len()
        )));
    }

    let given: Vec<f32> = stops.iter().filter_map(|s| s.position).collect();
    if given.is_empty() {
        return Ok(None);
    }
    if given.len() != stops.len() {
        return Err(Error::InvalidGradient(
            "either every color stop has a position or none does".to_string(),
        ));
    }
    if given.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidGradient("stop positions must be non-decreasing".to_string()));
    }
    if given.first() != Some(&0.0) || given.last() != Some(&1.0) {
        return Err(Error::InvalidGradient("stop positions must start at 0 and end at 1".to_string()));
    }

    Ok(Some(given))
}

/// Interpolate the stops linearly in sRGB and sample `n` colors.
pub fn sample_stops(stops: &[ColorStop], n: usize) -> Result<Vec<RGBColor>> {
    let domain = positions(stops)?;
    let colors: Vec<&str> = stops.iter().map(|s| s.color.trim()).collect();

    let mut builder = GradientBuilder::new();
    builder.html_colors(&colors).mode(BlendMode::Rgb);
    if let Some(domain) = &domain {
        builder.domain(domain);
    }

    let gradient = builder
        .build::<LinearGradient>()
        .map_err(|e| Error::InvalidGradient(e.to_string()))?;

    Ok(sample(&gradient, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_stops_hit_their_colors() {
        let stops = [ColorStop::new("#0000ff"), ColorStop::new("white"), ColorStop::new("red")];
        let colors = sample_stops(&stops, 101).unwrap();

        assert_eq!(colors[0], RGBColor::new(0, 0, 255));
        assert_eq!(colors[50], RGBColor::new(255, 255, 255));
        assert_eq!(colors[100], RGBColor::new(255, 0, 0));
        // halfway between blue and white
        assert!(colors[25].r.abs_diff(127) <= 1 && colors[25].b == 255);
    }

    #[test]
    fn test_positioned_stops() {
        let stops = [ColorStop::at("black", 0.0), ColorStop::at("#fff", 0.25), ColorStop::at("white", 1.0)];
        let colors = sample_stops(&stops, 5).unwrap();
        assert_eq!(colors[0], RGBColor::new(0, 0, 0));
        assert_eq!(colors[1], RGBColor::new(255, 255, 255));
        assert_eq!(colors[4], RGBColor::new(255, 255, 255));
    }

    #[test]
    fn test_invalid_stops() {
        let one = [ColorStop::new("red")];
        assert!(matches!(sample_stops(&one, 10), Err(Error::InvalidGradient(_))));

        let mixed = [ColorStop::at("red", 0.0), ColorStop::new("blue")];
        assert!(matches!(sample_stops(&mixed, 10), Err(Error::InvalidGradient(_))));

        let unordered = [ColorStop::at("red", 0.0), ColorStop::at("green", 0.8), ColorStop::at("blue", 0.5)];
        assert!(matches!(sample_stops(&unordered, 10), Err(Error::InvalidGradient(_))));

        let short = [ColorStop::at("red", 0.0), ColorStop::at("blue", 0.5)];
        assert!(matches!(sample_stops(&short, 10), Err(Error::InvalidGradient(_))));

        let bad_color = [ColorStop::new("red"), ColorStop::new("not-a-color")];
        assert!(matches!(sample_stops(&bad_color, 10), Err(Error::InvalidGradient(_))));
    }
}
