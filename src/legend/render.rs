//! Colorbar rasterization.

use image::{Rgba, RgbaImage};

use crate::colormap::Colormap;
use crate::legend::Orientation;
use crate::legend::glyphs::{draw_text, fill_rect, text_height, text_width};
use crate::legend::ticks::nice_ticks;

/// Colorbar geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorbarStyle {
    /// Length of the bar along the value axis
    pub bar_length: u32,
    /// Thickness of the bar across the value axis
    pub bar_thickness: u32,
    pub padding: u32,
    pub tick_length: u32,
    /// Space between tick marks and their labels
    pub label_gap: u32,
    pub glyph_scale: u32,
    /// Upper bound on the number of tick intervals
    pub max_ticks: usize,
}

impl Default for ColorbarStyle {
    fn default() -> Self {
        Self {
            bar_length: 400,
            bar_thickness: 40,
            padding: 16,
            tick_length: 8,
            label_gap: 6,
            glyph_scale: 3,
            max_ticks: 6,
        }
    }
}

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Render a colorbar for the value range `min..max`.
///
/// The bar shows the colormap the way shape fills see it: the color at each
/// position is the color of the value there. Ticks sit at nice values inside
/// the range; a degenerate range gets a single centered tick.
pub fn render_colorbar(cmap: &Colormap, min: f64, max: f64, orientation: Orientation, style: &ColorbarStyle) -> RgbaImage {
    let ticks = nice_ticks(min, max, style.max_ticks);
    let labels = ticks.labels();
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let degenerate = !(hi > lo);

    // Fraction along the bar, from the low end, of a value
    let position = |v: f64| if degenerate { 0.5 } else { (v - lo) / (hi - lo) };
    // Color of the bar at a fraction from the low end
    let color_at = |f: f64| {
        if degenerate {
            return cmap.at(0.5);
        }
        let v = lo + f * (hi - lo);
        cmap.at(((v - min) / (max - min)).clamp(0.0, 1.0))
    };

    let glyph_h = text_height(style.glyph_scale);
    let label_w = labels
        .iter()
        .map(|l| text_width(l, style.glyph_scale))
        .max()
        .unwrap_or(0);
    let len = style.bar_length.max(2);
    let thick = style.bar_thickness.max(1);
    let pad = style.padding.max(glyph_h / 2 + 2);

    match orientation {
        Orientation::Vertical => {
            let width = pad + thick + style.tick_length + style.label_gap + label_w + pad;
            let height = pad + len + pad;
            let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
            let (bar_x, bar_y) = (pad, pad);

            for j in 0..len {
                let f = 1.0 - (j as f64 + 0.5) / len as f64;
                let c = color_at(f);
                let px = Rgba([c.r, c.g, c.b, 255]);
                for i in 0..thick {
                    img.put_pixel(bar_x + i, bar_y + j, px);
                }
            }
            draw_frame(&mut img, bar_x, bar_y, thick, len);

            for (&value, label) in ticks.values.iter().zip(&labels) {
                let y = bar_y as i64 + ((1.0 - position(value)) * (len - 1) as f64).round() as i64;
                let tick_x = (bar_x + thick + 1) as i64;
                fill_rect(&mut img, tick_x, y, style.tick_length as i64, 1, INK);
                let text_x = tick_x + (style.tick_length + style.label_gap) as i64;
                draw_text(&mut img, text_x, y - glyph_h as i64 / 2, label, style.glyph_scale, INK);
            }
            img
        },
        Orientation::Horizontal => {
            let side = pad.max(label_w / 2 + 2);
            let width = side + len + side;
            let height = pad + thick + style.tick_length + style.label_gap + glyph_h + pad;
            let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);
            let (bar_x, bar_y) = (side, pad);

            for i in 0..len {
                let f = (i as f64 + 0.5) / len as f64;
                let c = color_at(f);
                let px = Rgba([c.r, c.g, c.b, 255]);
                for j in 0..thick {
                    img.put_pixel(bar_x + i, bar_y + j, px);
                }
            }
            draw_frame(&mut img, bar_x, bar_y, len, thick);

            for (&value, label) in ticks.values.iter().zip(&labels) {
                let x = bar_x as i64 + (position(value) * (len - 1) as f64).round() as i64;
                let tick_y = (bar_y + thick + 1) as i64;
                fill_rect(&mut img, x, tick_y, 1, style.tick_length as i64, INK);
                let text_y = tick_y + (style.tick_length + style.label_gap) as i64;
                let w = text_width(label, style.glyph_scale) as i64;
                draw_text(&mut img, x - w / 2, text_y, label, style.glyph_scale, INK);
            }
            img
        },
    }
}

/// One-pixel frame just outside the `w` by `h` bar at (`x`, `y`).
fn draw_frame(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
    let (x, y, w, h) = (x as i64 - 1, y as i64 - 1, w as i64 + 2, h as i64 + 2);
    fill_rect(img, x, y, w, 1, INK);
    fill_rect(img, x, y + h - 1, w, 1, INK);
    fill_rect(img, x, y, 1, h, INK);
    fill_rect(img, x + w - 1, y, 1, h, INK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::GradientSpec;
    use crate::common::RGBColor;

    fn viridis() -> Colormap {
        Colormap::from_spec(&GradientSpec::Named("viridis".into()), 100).unwrap()
    }

    fn rgba(c: RGBColor) -> Rgba<u8> {
        Rgba([c.r, c.g, c.b, 255])
    }

    #[test]
    fn test_vertical_layout() {
        let cmap = viridis();
        let style = ColorbarStyle::default();
        let img = render_colorbar(&cmap, 0.0, 10.0, Orientation::Vertical, &style);

        assert_eq!(img.height(), 16 + 400 + 16);
        assert!(img.width() > img.height() / 4);
        assert!(img.height() > img.width());

        // high values at the top, low values at the bottom
        assert_eq!(*img.get_pixel(16 + 20, 16), rgba(cmap.colors()[99]));
        assert_eq!(*img.get_pixel(16 + 20, 16 + 399), rgba(cmap.colors()[0]));
        // frame
        assert_eq!(*img.get_pixel(15, 100), INK);
        assert_eq!(*img.get_pixel(16 + 40, 100), INK);
        assert_eq!(*img.get_pixel(30, 15), INK);
        // tick at the top end (value 10)
        assert_eq!(*img.get_pixel(16 + 40 + 4, 16), INK);
    }

    #[test]
    fn test_horizontal_layout() {
        let cmap = viridis();
        let img = render_colorbar(&cmap, 0.0, 10.0, Orientation::Horizontal, &ColorbarStyle::default());

        assert!(img.width() > img.height());
        let left = img.width() / 2 - 200;
        assert_eq!(*img.get_pixel(left, 16 + 20), rgba(cmap.colors()[0]));
        assert_eq!(*img.get_pixel(left + 399, 16 + 20), rgba(cmap.colors()[99]));

        // labels are drawn below the ticks
        let label_top = 16 + 40 + 1 + 8 + 6;
        let inked = (label_top..img.height())
            .flat_map(|y| (0..img.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) == INK)
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_degenerate_range_is_uniform() {
        let cmap = viridis();
        let img = render_colorbar(&cmap, 5.0, 5.0, Orientation::Horizontal, &ColorbarStyle::default());
        let left = img.width() / 2 - 200;
        let mid = rgba(cmap.at(0.5));
        assert_eq!(*img.get_pixel(left, 30), mid);
        assert_eq!(*img.get_pixel(left + 399, 30), mid);
    }
}
