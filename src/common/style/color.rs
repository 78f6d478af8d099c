use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
/// This is the value written into DrawingML `a:srgbClr` elements.
///
/// # Examples
///
/// ```rust
/// use pathtint::common::RGBColor;
///
/// let orange = RGBColor::new(255, 128, 0);
/// assert_eq!(orange.to_hex(), "FF8000");
///
/// let blue = RGBColor::from_hex("#0000FF").unwrap();
/// assert_eq!(blue, RGBColor::new(0, 0, 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unit-interval channels.
    ///
    /// Each channel is scaled by 255 and truncated, so `1.0` maps to 255 and
    /// `0.999` maps to 254. Out-of-range and NaN inputs saturate.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        #[inline]
        fn channel(c: f32) -> u8 {
            (255.0 * c.clamp(0.0, 1.0)) as u8
        }
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Create an RGB color from a hex string ("FF0000" or "#FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to hex string (without # prefix), uppercase as DrawingML writes it.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as an opaque RGBA pixel.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = RGBColor::from_hex("#2A788E").unwrap();
        assert_eq!(c, RGBColor::new(0x2A, 0x78, 0x8E));
        assert_eq!(c.to_hex(), "2A788E");
        assert_eq!(c.to_string(), "#2A788E");
    }

    #[test]
    fn test_from_hex_rejects_short_and_non_ascii() {
        assert!(RGBColor::from_hex("FFF").is_none());
        assert!(RGBColor::from_hex("ZZZZZZ").is_none());
        assert!(RGBColor::from_hex("ééé").is_none());
    }

    #[test]
    fn test_from_unit_truncates() {
        assert_eq!(RGBColor::from_unit(1.0, 0.0, 0.5), RGBColor::new(255, 0, 127));
        assert_eq!(RGBColor::from_unit(0.999, -1.0, 2.0), RGBColor::new(254, 0, 255));
    }
}
