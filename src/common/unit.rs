//! DrawingML length units.

/// English Metric Units per inch.
pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMU, rounding to the nearest unit.
#[inline]
pub fn inch_to_emu(inches: f64) -> i64 {
    (inches * EMUS_PER_INCH as f64).round() as i64
}

/// Scale `width` so that it keeps the `px_width:px_height` aspect ratio at `height`.
#[inline]
pub fn scaled_width(height: i64, px_width: u32, px_height: u32) -> i64 {
    if px_height == 0 {
        return 0;
    }
    ((height as f64) * px_width as f64 / px_height as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_to_emu() {
        assert_eq!(inch_to_emu(1.0), 914_400);
        assert_eq!(inch_to_emu(9.5), 8_686_800);
        assert_eq!(inch_to_emu(2.0), 1_828_800);
    }

    #[test]
    fn test_scaled_width_preserves_aspect() {
        assert_eq!(scaled_width(1_828_800, 100, 200), 914_400);
        assert_eq!(scaled_width(1_828_800, 0, 0), 0);
    }
}
