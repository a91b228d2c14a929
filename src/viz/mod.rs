//! Render a well-construction diagram to a standalone **SVG** document.
//!
//! - Depth (vertical) and diameter (horizontal) placement via one linear scale
//! - Solid fills for seals/casings, tiled image patterns for lithology and
//!   open intervals, white for boreholes
//! - Per-rectangle `<title>` tooltips carrying the interval wording
//! - Deduplicated legend swatch column, first-seen order
//! - "No data" placeholder when the site has no construction records

pub mod axis;
pub mod legend;
pub mod svg;

// Re-export types for public API
pub use axis::{AxisRange, LinearScale, nice_range};
pub use svg::{Fill, fmt_num};

use crate::models::{Interval, IntervalKind, WellReport};
use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use legend::{LegendBuilder, draw_legend};
use svg::SvgDoc;

/// Placeholder drawn when a site has no construction records.
pub const NO_DATA_LABEL: &str = "No Well Construction Information";

/// Default fill for casing whose material carries no display color.
const CASING_FALLBACK_COLOR: &str = "#808080";

/// Rendering knobs. Defaults reproduce the canonical 150x550 px plot box with
/// room for the legend column on the right.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Prefix for pattern tile references (relative URL or directory).
    pub pattern_base: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 700,
            height: 680,
            pattern_base: "patterns".to_string(),
        }
    }
}

/// Pixel geometry of the plot box and legend column.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x_box_min: f64,
    x_box_max: f64,
    y_box_min: f64,
    y_box_max: f64,
    legend_x: f64,
}

impl Layout {
    fn new(opts: &RenderOptions) -> Self {
        let y_box_min = 50.0;
        let y_box_max = (opts.height as f64 - 80.0).max(y_box_min + 100.0);
        let x_box_min = 75.0;
        let x_box_max = x_box_min + 150.0;
        Self {
            x_box_min,
            x_box_max,
            y_box_min,
            y_box_max,
            legend_x: x_box_max + 100.0,
        }
    }

    fn x_mid(&self) -> f64 {
        (self.x_box_min + self.x_box_max) * 0.5
    }

    fn box_width(&self) -> f64 {
        self.x_box_max - self.x_box_min
    }

    fn box_center(&self) -> (f64, f64) {
        (self.x_mid(), (self.y_box_min + self.y_box_max) * 0.5)
    }
}

/// Render with default options.
pub fn render_diagram(report: &WellReport) -> Result<String> {
    render_diagram_with(report, &RenderOptions::default())
}

/// Render and write the SVG to `path`.
pub fn render_to_file<P: AsRef<Path>>(
    report: &WellReport,
    path: P,
    opts: &RenderOptions,
) -> Result<()> {
    let svg = render_diagram_with(report, opts)?;
    std::fs::write(path.as_ref(), svg)?;
    Ok(())
}

/// Fully-configurable entry point: one render session, one SVG document out.
pub fn render_diagram_with(report: &WellReport, opts: &RenderOptions) -> Result<String> {
    let layout = Layout::new(opts);
    let mut session = RenderSession {
        layout,
        doc: SvgDoc::new(opts.width, opts.height),
        legend: LegendBuilder::new(),
        registered_patterns: Vec::new(),
        pattern_base: opts.pattern_base.clone(),
    };
    session.render(report);
    Ok(session.doc.finish())
}

/// All mutable state for one rendering pass. Nothing outlives the session, so
/// repeated renders never see each other's legend or pattern lists.
struct RenderSession {
    layout: Layout,
    doc: SvgDoc,
    legend: LegendBuilder,
    registered_patterns: Vec<String>,
    pattern_base: String,
}

impl RenderSession {
    fn render(&mut self, report: &WellReport) {
        let layout = self.layout;

        // Site title and bore box are drawn even when there is nothing else.
        self.doc.text(
            layout.x_box_min,
            layout.y_box_min * 0.5,
            "site_title",
            None,
            &format!("Site {}", report.sitefile.site_no),
        );
        self.doc.rect(
            layout.x_box_min,
            layout.y_box_min,
            layout.box_width(),
            layout.y_box_max - layout.y_box_min,
            &Fill::Solid("#cccccc".to_string()),
            "bore_box",
            None,
            None,
        );

        if report.is_empty() {
            debug!("site {}: no construction records", report.sitefile.site_no);
            self.no_data_placeholder();
            return;
        }

        let intervals = report.intervals();
        debug!(
            "site {}: {} drawable intervals",
            report.sitefile.site_no,
            intervals.len()
        );

        // Vertical axis: nice range over the reported depth extent, negative
        // minimum clamped to zero (depths start at land surface).
        let data_min = report.y_min.unwrap_or(0.0);
        let data_max = report.y_max.or_else(|| max_bottom(&intervals));
        let Some(data_max) = data_max else {
            warn!("no depth extent available; drawing placeholder");
            self.no_data_placeholder();
            return;
        };
        let mut y_axis = nice_range(data_min, data_max);
        if y_axis.min < 0.0 {
            y_axis.min = 0.0;
        }
        let Some(y_scale) = LinearScale::new(
            (y_axis.min, y_axis.max),
            (layout.y_box_min, layout.y_box_max),
        ) else {
            warn!(
                "degenerate depth range {}..{}; drawing placeholder",
                y_axis.min, y_axis.max
            );
            self.no_data_placeholder();
            return;
        };

        // Horizontal axis: diameters map proportionally onto the box width.
        let dia_max = report.dia_max.or_else(|| max_diameter(&intervals));
        let x_axis = dia_max.map(|d| nice_range(0.0, d));

        let land_surface = report
            .land_surface
            .or(report.sitefile.alt_va)
            .unwrap_or(0.0);

        self.left_depth_axis(&y_axis, &y_scale);
        self.right_elevation_axis(&y_axis, &y_scale, land_surface, &report.sitefile.alt_datum_cd);
        if let Some(ref x_axis) = x_axis {
            self.bottom_diameter_axis(x_axis);
        }

        // Lithology first so construction rectangles draw over it.
        self.doc.open_group("lithology");
        for interval in intervals.iter().filter(|i| i.kind == IntervalKind::Lithology) {
            self.draw_interval(interval, &y_axis, &y_scale, x_axis.as_ref());
        }
        self.doc.close_group();

        self.doc.open_group("wellBore");
        for interval in intervals.iter().filter(|i| i.kind != IntervalKind::Lithology) {
            self.draw_interval(interval, &y_axis, &y_scale, x_axis.as_ref());
        }
        self.doc.close_group();

        let entries: Vec<_> = self.legend.entries().to_vec();
        draw_legend(&mut self.doc, &entries, layout.legend_x, layout.y_box_min);
    }

    fn no_data_placeholder(&mut self) {
        let (cx, cy) = self.layout.box_center();
        self.doc.rotated_text(cx, cy, "y_axis_label", NO_DATA_LABEL);
    }

    /// Width in pixels of a rectangle for `diameter` inches.
    fn width_for(&self, diameter: f64, x_axis: &AxisRange) -> f64 {
        let px_span = self.layout.box_width();
        px_span * diameter / x_axis.span()
    }

    fn fill_for(&mut self, interval: &Interval) -> Fill {
        match interval.kind {
            IntervalKind::Seal => Fill::Solid(
                interval
                    .color
                    .clone()
                    .unwrap_or_else(|| crate::models::DEFAULT_SEAL_COLOR.to_string()),
            ),
            IntervalKind::Borehole => Fill::Solid("white".to_string()),
            IntervalKind::Casing => Fill::Solid(
                interval
                    .color
                    .clone()
                    .unwrap_or_else(|| CASING_FALLBACK_COLOR.to_string()),
            ),
            IntervalKind::Lithology | IntervalKind::OpenInterval => match &interval.pattern {
                Some(image) => {
                    self.register_pattern(image);
                    Fill::Pattern(image.clone())
                }
                None => Fill::Solid("white".to_string()),
            },
        }
    }

    /// Register a pattern tile once per image name.
    fn register_pattern(&mut self, image: &str) {
        if self.registered_patterns.iter().any(|p| p == image) {
            return;
        }
        let href = format!("{}/{}", self.pattern_base, image);
        self.doc.add_pattern(image, &href);
        self.registered_patterns.push(image.to_string());
    }

    fn draw_interval(
        &mut self,
        interval: &Interval,
        y_axis: &AxisRange,
        y_scale: &LinearScale,
        x_axis: Option<&AxisRange>,
    ) {
        let layout = self.layout;
        let top = interval.top_depth;
        // Open-ended lithology extends to the bottom of the axis.
        let bottom = interval.bottom_depth.unwrap_or(y_axis.max);

        let y_top = y_scale.map(top);
        let y_bot = y_scale.map(bottom);
        let thickness = y_bot - y_top;

        let (x, width) = match interval.kind {
            IntervalKind::Lithology => (layout.x_box_min, layout.box_width()),
            IntervalKind::Seal => {
                let width = layout.box_width() * 0.9;
                (layout.x_mid() - 0.5 * width, width)
            }
            IntervalKind::Borehole | IntervalKind::Casing | IntervalKind::OpenInterval => {
                match (interval.diameter, x_axis) {
                    (Some(dia), Some(x_axis)) => {
                        let width = self.width_for(dia, x_axis);
                        (layout.x_mid() - 0.5 * width, width)
                    }
                    // No recorded diameter: draw at the seal convention so
                    // the record stays visible.
                    _ => {
                        let width = layout.box_width() * 0.9;
                        (layout.x_mid() - 0.5 * width, width)
                    }
                }
            }
        };

        let fill = self.fill_for(interval);
        let tooltip = tooltip_text(interval, bottom);
        let id = element_id(interval);

        self.doc.rect(
            x,
            y_top,
            width,
            thickness,
            &fill,
            css_class(interval.kind),
            id.as_deref(),
            Some(&tooltip),
        );

        if let Some(label) = legend_label(interval) {
            self.legend.add(id.unwrap_or_default(), label, fill);
        }
    }
}

fn max_bottom(intervals: &[Interval]) -> Option<f64> {
    intervals
        .iter()
        .flat_map(|i| [Some(i.top_depth), i.bottom_depth])
        .flatten()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

fn max_diameter(intervals: &[Interval]) -> Option<f64> {
    intervals
        .iter()
        .filter_map(|i| i.diameter)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

fn css_class(kind: IntervalKind) -> &'static str {
    match kind {
        IntervalKind::Lithology => "lithology",
        IntervalKind::Seal => "seal",
        IntervalKind::Borehole => "hole",
        IntervalKind::Casing => "csng",
        IntervalKind::OpenInterval => "open",
    }
}

fn element_id(interval: &Interval) -> Option<String> {
    match interval.kind {
        IntervalKind::Lithology => {
            (!interval.code.is_empty()).then(|| interval.code.clone())
        }
        IntervalKind::Seal => Some(format!("seal_{}", interval.code)),
        IntervalKind::Borehole => Some("hole".to_string()),
        IntervalKind::Casing => Some(format!("casing_{}", interval.code)),
        IntervalKind::OpenInterval => Some(format!("open_{}", interval.code)),
    }
}

/// Tooltip wording per interval kind; depth and diameter values keep their
/// shortest display form.
fn tooltip_text(interval: &Interval, bottom: f64) -> String {
    let top = fmt_num(interval.top_depth);
    let bottom = fmt_num(bottom);
    match interval.kind {
        IntervalKind::Lithology => {
            format!("{} from {} to {} feet", interval.description, top, bottom)
        }
        IntervalKind::Seal => format!(
            "Seal, {} from {} to {} feet",
            interval.description, top, bottom
        ),
        IntervalKind::Borehole => format!(
            "Borehole diameter {} inches from {} to {} feet",
            interval.diameter.map(fmt_num).unwrap_or_default(),
            top,
            bottom
        ),
        IntervalKind::Casing => format!(
            "{} casing diameter {} inches from {} to {} feet",
            interval.description,
            interval.diameter.map(fmt_num).unwrap_or_default(),
            top,
            bottom
        ),
        IntervalKind::OpenInterval => {
            let dia_clause = interval
                .diameter
                .map(|d| format!("diameter {} inches, ", fmt_num(d)))
                .unwrap_or_default();
            format!(
                "Open interval, {}{} from {} to {} feet",
                dia_clause, interval.description, top, bottom
            )
        }
    }
}

fn legend_label(interval: &Interval) -> Option<String> {
    match interval.kind {
        IntervalKind::Lithology => Some(interval.description.clone()),
        IntervalKind::Seal => Some(format!("Seal, {}", interval.description)),
        IntervalKind::Casing => Some(format!("Casing, {}", interval.description)),
        IntervalKind::OpenInterval => Some(format!("Open interval, {}", interval.description)),
        IntervalKind::Borehole => None,
    }
}

impl RenderSession {
    fn left_depth_axis(&mut self, y_axis: &AxisRange, y_scale: &LinearScale) {
        let layout = self.layout;
        self.doc.open_group("tics");

        let mut y = y_axis.min;
        while y <= y_axis.max + 1e-9 {
            let y_tic = y_scale.map(y);
            self.doc
                .line(layout.x_box_min, y_tic, layout.x_box_min + 10.0, y_tic);
            self.doc
                .line(layout.x_box_max, y_tic, layout.x_box_max - 10.0, y_tic);
            self.doc.text(
                layout.x_box_min - 9.0,
                y_tic + 3.0,
                "tic_labels",
                Some("end"),
                &fmt_num(y),
            );
            y += y_axis.interval;
        }

        self.doc.rotated_text(
            layout.x_box_min * 0.25,
            (layout.y_box_max + layout.y_box_min) * 0.5,
            "y_axis_label",
            "Depth Below Land Surface, in feet",
        );
        self.doc.close_group();
    }

    fn right_elevation_axis(
        &mut self,
        y_axis: &AxisRange,
        y_scale: &LinearScale,
        land_surface: f64,
        alt_datum_cd: &str,
    ) {
        let layout = self.layout;
        let accuracy = decimal_places(land_surface);
        self.doc.open_group("elevation_tics");

        let mut y = y_axis.min;
        while y <= y_axis.max + 1e-9 {
            let y_tic = y_scale.map(y);
            self.doc.text(
                layout.x_box_max + 12.0,
                y_tic + 3.0,
                "tic_labels",
                Some("start"),
                &format!("{:.*}", accuracy, land_surface - y),
            );
            y += y_axis.interval;
        }

        let label = if alt_datum_cd.is_empty() {
            "Elevation, in feet".to_string()
        } else {
            format!("Elevation, in feet {}", alt_datum_cd)
        };
        self.doc.rotated_text(
            layout.x_box_max + 62.0,
            (layout.y_box_max + layout.y_box_min) * 0.5,
            "y_axis_label",
            &label,
        );
        self.doc.close_group();
    }

    fn bottom_diameter_axis(&mut self, x_axis: &AxisRange) {
        let layout = self.layout;
        let Some(scale) = LinearScale::new(
            (x_axis.min, x_axis.max),
            (layout.x_box_min, layout.x_box_max),
        ) else {
            return;
        };
        self.doc.open_group("diameter_tics");

        let mut d = x_axis.min;
        while d <= x_axis.max + 1e-9 {
            if d >= 0.0 {
                let x_tic = scale.map(d);
                self.doc.line(x_tic, layout.y_box_max, x_tic, layout.y_box_max + 6.0);
                self.doc.text(
                    x_tic,
                    layout.y_box_max + 18.0,
                    "tic_labels",
                    Some("middle"),
                    &fmt_num(d),
                );
            }
            d += x_axis.interval;
        }

        self.doc.text(
            layout.x_mid(),
            layout.y_box_max + 36.0,
            "x_axis_label",
            Some("middle"),
            "Borehole Diameter, inches",
        );
        self.doc.close_group();
    }
}

/// Number of digits after the decimal point in the value's shortest display
/// form. Drives elevation label precision so it matches the recorded
/// altitude.
fn decimal_places(v: f64) -> usize {
    let s = format!("{}", v);
    s.split_once('.').map_or(0, |(_, frac)| frac.len().min(6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_places_tracks_altitude_form() {
        assert_eq!(decimal_places(4186.0), 0);
        assert_eq!(decimal_places(4186.5), 1);
        assert_eq!(decimal_places(4186.56), 2);
    }
}
