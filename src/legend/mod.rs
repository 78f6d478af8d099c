//! Colorbar legends.
//!
//! Two static images are produced per run, a vertical and a horizontal
//! colorbar, each labeled with nice tick values.

pub mod glyphs;
pub mod render;
pub mod ticks;

pub use render::{ColorbarStyle, render_colorbar};

use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Deserialize;
use tracing::info;

use crate::colormap::Colormap;
use crate::common::error::Result;

/// Colorbar direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// File name of the colorbar image with this orientation.
    pub fn file_name(self) -> &'static str {
        match self {
            Orientation::Vertical => "colorbar_vertical.png",
            Orientation::Horizontal => "colorbar_horizontal.png",
        }
    }
}

/// Paths of the written colorbar images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorbarFiles {
    pub vertical: PathBuf,
    pub horizontal: PathBuf,
}

impl ColorbarFiles {
    pub fn get(&self, orientation: Orientation) -> &Path {
        match orientation {
            Orientation::Vertical => &self.vertical,
            Orientation::Horizontal => &self.horizontal,
        }
    }
}

/// Render both colorbars for `min..max` and save them as PNG files in
/// `directory`, creating it if needed.
pub fn write_colorbars(cmap: &Colormap, min: f64, max: f64, directory: &Path) -> Result<ColorbarFiles> {
    std::fs::create_dir_all(directory)?;
    let style = ColorbarStyle::default();

    let write = |orientation: Orientation| -> Result<PathBuf> {
        let path = directory.join(orientation.file_name());
        let img = render_colorbar(cmap, min, max, orientation, &style);
        img.save_with_format(&path, ImageFormat::Png)?;
        info!(path = %path.display(), width = img.width(), height = img.height(), "colorbar written");
        Ok(path)
    };

    Ok(ColorbarFiles {
        vertical: write(Orientation::Vertical)?,
        horizontal: write(Orientation::Horizontal)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::GradientSpec;

    #[test]
    fn test_write_colorbars_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let cmap = Colormap::from_spec(&GradientSpec::Named("plasma".into()), 100).unwrap();

        let files = write_colorbars(&cmap, -1.0, 1.0, &out).unwrap();
        assert_eq!(files.vertical, out.join("colorbar_vertical.png"));
        assert_eq!(files.horizontal, out.join("colorbar_horizontal.png"));

        let vertical = image::open(&files.vertical).unwrap();
        let horizontal = image::open(files.get(Orientation::Horizontal)).unwrap();
        assert!(vertical.height() > vertical.width());
        assert!(horizontal.width() > horizontal.height());
    }
}
