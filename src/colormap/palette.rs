//! Named palettes.
//!
//! Names follow the matplotlib vocabulary and are matched
//! case-insensitively. A `_r` suffix reverses the palette.

use colorgrad::{Gradient, preset};

use crate::common::RGBColor;
use crate::common::error::{Error, Result};

/// Every palette name that [`sample_named`] accepts, without the `_r` variants.
pub const PALETTE_NAMES: [&str; 38] = [
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "rainbow", "Spectral", "RdYlBu",
    "RdBu", "RdYlGn", "PiYG", "PRGn", "BrBG", "RdGy", "PuOr", "Blues", "Greens", "Greys",
    "Oranges", "Purples", "Reds", "BuGn", "BuPu", "GnBu", "OrRd", "PuBuGn", "PuBu", "PuRd",
    "RdPu", "YlGnBu", "YlGn", "YlOrBr", "YlOrRd", "cool", "warm", "cubehelix", "sinebow",
];

/// `n` evenly spaced samples of `gradient` over [0, 1], both ends included.
pub(crate) fn sample<G: Gradient + ?Sized>(gradient: &G, n: usize) -> Vec<RGBColor> {
    let last = n.saturating_sub(1).max(1) as f32;
    (0..n)
        .map(|i| {
            let c = gradient.at(i as f32 / last);
            RGBColor::from_unit(c.r, c.g, c.b)
        })
        .collect()
}

/// Sample the named palette into `n` colors.
pub fn sample_named(name: &str, n: usize) -> Result<Vec<RGBColor>> {
    let lower = name.to_ascii_lowercase();
    let (base, reversed) = match lower.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (lower.as_str(), false),
    };

    let mut colors = match base {
        "viridis" => sample(&preset::viridis(), n),
        "plasma" => sample(&preset::plasma(), n),
        "inferno" => sample(&preset::inferno(), n),
        "magma" => sample(&preset::magma(), n),
        "cividis" => sample(&preset::cividis(), n),
        "turbo" => sample(&preset::turbo(), n),
        "rainbow" => sample(&preset::rainbow(), n),
        "spectral" => sample(&preset::spectral(), n),
        "rdylbu" => sample(&preset::rd_yl_bu(), n),
        "rdbu" => sample(&preset::rd_bu(), n),
        "rdylgn" => sample(&preset::rd_yl_gn(), n),
        "piyg" => sample(&preset::pi_yg(), n),
        "prgn" => sample(&preset::pr_gn(), n),
        "brbg" => sample(&preset::br_bg(), n),
        "rdgy" => sample(&preset::rd_gy(), n),
        "puor" => sample(&preset::pu_or(), n),
        "blues" => sample(&preset::blues(), n),
        "greens" => sample(&preset::greens(), n),
        "greys" => sample(&preset::greys(), n),
        "oranges" => sample(&preset::oranges(), n),
        "purples" => sample(&preset::purples(), n),
        "reds" => sample(&preset::reds(), n),
        "bugn" => sample(&preset::bu_gn(), n),
        "bupu" => sample(&preset::bu_pu(), n),
        "gnbu" => sample(&preset::gn_bu(), n),
        "orrd" => sample(&preset::or_rd(), n),
        "pubugn" => sample(&preset::pu_bu_gn(), n),
        "pubu" => sample(&preset::pu_bu(), n),
        "purd" => sample(&preset::pu_rd(), n),
        "rdpu" => sample(&preset::rd_pu(), n),
        "ylgnbu" => sample(&preset::yl_gn_bu(), n),
        "ylgn" => sample(&preset::yl_gn(), n),
        "ylorbr" => sample(&preset::yl_or_br(), n),
        "ylorrd" => sample(&preset::yl_or_rd(), n),
        "cool" => sample(&preset::cool(), n),
        "warm" => sample(&preset::warm(), n),
        "cubehelix" => sample(&preset::cubehelix_default(), n),
        "sinebow" => sample(&preset::sinebow(), n),
        _ => return Err(Error::UnknownPalette(name.to_string())),
    };

    if reversed {
        colors.reverse();
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for name in PALETTE_NAMES {
            assert_eq!(sample_named(name, 10).unwrap().len(), 10, "{name}");
            assert_eq!(sample_named(&format!("{name}_r"), 10).unwrap().len(), 10, "{name}_r");
        }
    }

    #[test]
    fn test_viridis_endpoints() {
        let colors = sample_named("Viridis", 100).unwrap();
        // #440154 at 0 and #FDE725 at 1, within rounding of the preset
        let (first, last) = (colors[0], colors[99]);
        assert!(first.r.abs_diff(0x44) <= 2 && first.g.abs_diff(0x01) <= 2 && first.b.abs_diff(0x54) <= 2);
        assert!(last.r.abs_diff(0xfd) <= 2 && last.g.abs_diff(0xe7) <= 2 && last.b.abs_diff(0x25) <= 2);
    }

    #[test]
    fn test_reversed() {
        let forward = sample_named("magma", 16).unwrap();
        let mut backward = sample_named("MAGMA_r", 16).unwrap();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(sample_named("jet", 10), Err(Error::UnknownPalette(n)) if n == "jet"));
    }
}
