//! The annotation pipeline: color labeled shapes, add the legend picture,
//! save the new presentation.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::colormap::map_color;
use crate::common::RGBColor;
use crate::common::error::{Error, Result};
use crate::common::unit::inch_to_emu;
use crate::config::{Config, DEFAULT_CONFIG_PATH, LegendConfig};
use crate::legend::write_colorbars;
use crate::ooxml::pptx::{LabelMatch, Package, RecolorStats, ShapeScope};
use crate::sheet::{EntityValues, load_entity_values};

/// Inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Data table (.csv or .xlsx)
    pub input: PathBuf,
    /// Presentation to annotate
    pub pathway: PathBuf,
    /// Where the annotated presentation is written
    pub output: PathBuf,
    pub config: PathBuf,
    /// Overrides the configured legend directory
    pub legend_dir: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>, pathway: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            pathway: pathway.into(),
            output: output.into(),
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            legend_dir: None,
        }
    }
}

/// What a run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    pub slides: usize,
    /// Shapes with a text body whose label was looked up
    pub shapes_examined: usize,
    pub shapes_colored: usize,
    /// Shapes whose label names an entity without a value
    pub matched_without_color: usize,
}

/// Where the legend picture goes on each slide.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendPlacement<'a> {
    pub image: &'a Path,
    pub left_inches: f64,
    pub top_inches: f64,
    pub height_inches: f64,
}

impl<'a> LegendPlacement<'a> {
    pub fn new(image: &'a Path, config: &LegendConfig) -> Self {
        Self {
            image,
            left_inches: config.left_inches,
            top_inches: config.top_inches,
            height_inches: config.height_inches,
        }
    }
}

/// Open `pathway`, fill every shape whose label is a key of `values` with
/// `color_of` its value, place the legend on every slide, and save to `output`.
pub fn annotate_presentation<F>(
    pathway: &Path,
    output: &Path,
    values: &EntityValues,
    color_of: F,
    legend: &LegendPlacement<'_>,
    scope: ShapeScope,
) -> Result<AnnotationReport>
where
    F: Fn(Option<f64>) -> Option<RGBColor>,
{
    if same_file(pathway, output) {
        return Err(Error::Config(format!(
            "output {} would overwrite the input presentation",
            output.display()
        )));
    }

    let mut pkg = Package::open(pathway)?;
    let slides = pkg.slide_partnames()?;
    info!(path = %pathway.display(), slides = slides.len(), "presentation opened");

    let lookup = |label: &str| match values.get(label) {
        None => LabelMatch::Unmatched,
        Some(value) => match color_of(value) {
            Some(color) => LabelMatch::Color(color),
            None => LabelMatch::NoColor,
        },
    };

    let mut totals = RecolorStats::default();
    for slide in &slides {
        let stats = pkg.recolor_slide(slide, scope, lookup)?;
        debug!(%slide, colored = stats.colored, examined = stats.examined, "slide annotated");
        totals += stats;
    }

    if !slides.is_empty() {
        let blob = std::fs::read(legend.image)?;
        let filename = legend
            .image
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let image = pkg.add_image(blob, &filename)?;

        let (left, top, height) = (
            inch_to_emu(legend.left_inches),
            inch_to_emu(legend.top_inches),
            inch_to_emu(legend.height_inches),
        );
        for slide in &slides {
            pkg.add_picture(slide, &image, left, top, height)?;
        }
    }

    pkg.save(output)?;

    Ok(AnnotationReport {
        slides: slides.len(),
        shapes_examined: totals.examined,
        shapes_colored: totals.colored,
        matched_without_color: totals.matched_without_color,
    })
}

/// True if both paths name the same file. Paths that do not exist yet are
/// compared as given.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Run the whole pipeline: configuration, data, legends, presentation.
pub fn run(options: &RunOptions) -> Result<AnnotationReport> {
    let config = Config::load(&options.config)?;
    let values = load_entity_values(&options.input, &config.data.key_column, &config.data.value_column)?;

    let scale = &config.color_scale;
    let cmap = scale.colormap()?;

    let legend_dir = options
        .legend_dir
        .as_deref()
        .unwrap_or(config.legend.directory.as_path());
    let colorbars = write_colorbars(&cmap, scale.min_value, scale.max_value, legend_dir)?;

    let scope = if config.match_grouped_shapes {
        ShapeScope::IncludeGroups
    } else {
        ShapeScope::TopLevel
    };
    let placement = LegendPlacement::new(colorbars.get(config.legend.orientation), &config.legend);

    let report = annotate_presentation(
        &options.pathway,
        &options.output,
        &values,
        |value| map_color(value, scale.min_value, scale.max_value, &cmap),
        &placement,
        scope,
    )?;

    info!(
        slides = report.slides,
        examined = report.shapes_examined,
        colored = report.shapes_colored,
        without_value = report.matched_without_color,
        "annotation finished"
    );
    Ok(report)
}
