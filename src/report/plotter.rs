//! HTML chart output
//!
//! Produces a single self-contained HTML file holding an inline SVG line
//! chart drawn with `plotters`, one line per trace. Opening the file needs
//! nothing but a browser.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use once_cell::sync::Lazy;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::errors::{Error, Result, file_operation_error, generic_error, trace_configuration_error};
use crate::labels::Label;

use super::trace::{TraceData, TraceSet, TraceSink};

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 540;
const DEFAULT_LINE_WIDTH: f64 = 2.0;
const LEGEND_LINE_LENGTH: i32 = 20;

/// Colors given to traces whose line style does not pick one
const DEFAULT_COLORS: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Color names accepted in line styles
const NAMED_COLORS: [(&str, RGBColor); 14] = [
    ("black", RGBColor(0, 0, 0)),
    ("white", RGBColor(255, 255, 255)),
    ("red", RGBColor(255, 0, 0)),
    ("green", RGBColor(0, 128, 0)),
    ("blue", RGBColor(0, 0, 255)),
    ("yellow", RGBColor(255, 255, 0)),
    ("cyan", RGBColor(0, 255, 255)),
    ("magenta", RGBColor(255, 0, 255)),
    ("orange", RGBColor(255, 165, 0)),
    ("purple", RGBColor(128, 0, 128)),
    ("brown", RGBColor(165, 42, 42)),
    ("pink", RGBColor(255, 192, 203)),
    ("gray", RGBColor(128, 128, 128)),
    ("grey", RGBColor(128, 128, 128)),
];

static HEX_COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$")
        .expect("Failed to compile regex pattern for HEX_COLOR_PATTERN")
});

static RGB_COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(0|1|1\.0*|0?\.\d+)\s*)?\)$",
    )
    .expect("Failed to compile regex pattern for RGB_COLOR_PATTERN")
});

static DASH_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d+)?(px)?(\s*,\s*\d+(\.\d+)?(px)?)*$")
        .expect("Failed to compile regex pattern for DASH_LIST_PATTERN")
});

/// How a line joins consecutive points
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    #[default]
    Linear,
    Hv,
    Vh,
    Hvh,
    Vhv,
}

/// Display attributes of one trace's line
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LineStyle {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub dash: Option<String>,
    #[serde(default)]
    pub shape: LineShape,
}

impl LineStyle {
    /// Reads and validates a line style from its JSON form
    ///
    /// `null` gives the default style.
    ///
    /// # Errors
    /// Fails with a trace configuration error naming the first problem found
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        if value.is_null() {
            return Ok(LineStyle::default());
        }

        let style: LineStyle = serde_json::from_value(value.clone())
            .map_err(|e| trace_configuration_error(&e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    /// Checks every attribute that serde cannot check by itself
    pub fn validate(&self) -> Result<()> {
        if let Some(color) = &self.color {
            if parse_color(color).is_none() {
                return Err(trace_configuration_error(&format!(
                    "invalid value '{color}' for line property 'color'"
                )));
            }
        }

        if let Some(width) = self.width {
            if !(width >= 0.0) || !width.is_finite() {
                return Err(trace_configuration_error(&format!(
                    "invalid value '{width}' for line property 'width'"
                )));
            }
        }

        if let Some(dash) = &self.dash {
            if parse_dash(dash).is_none() {
                return Err(trace_configuration_error(&format!(
                    "invalid value '{dash}' for line property 'dash'"
                )));
            }
        }

        Ok(())
    }

    /// Stroke of the trace drawn at position `index`
    fn shape_style(&self, index: usize) -> Result<ShapeStyle> {
        let color = match &self.color {
            Some(color) => parse_color(color).ok_or_else(|| {
                trace_configuration_error(&format!(
                    "invalid value '{color}' for line property 'color'"
                ))
            })?,
            None => DEFAULT_COLORS[index % DEFAULT_COLORS.len()].to_rgba(),
        };

        Ok(ShapeStyle {
            color,
            filled: false,
            stroke_width: self.width.unwrap_or(DEFAULT_LINE_WIDTH).round() as u32,
        })
    }

    fn dash(&self) -> Dash {
        self.dash
            .as_deref()
            .and_then(parse_dash)
            .unwrap_or(Dash::Solid)
    }
}

/// Parses a hex, `rgb()`/`rgba()` or named color
fn parse_color(color: &str) -> Option<RGBAColor> {
    let color = color.trim();

    if let Some(captures) = HEX_COLOR_PATTERN.captures(color) {
        let digits = captures.get(1)?.as_str();
        let digits = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        return Some(RGBAColor(channel(0)?, channel(2)?, channel(4)?, 1.0));
    }

    if let Some(captures) = RGB_COLOR_PATTERN.captures(color) {
        let channel = |i: usize| captures.get(i)?.as_str().parse::<u8>().ok();
        let alpha = match captures.get(4) {
            Some(alpha) => alpha.as_str().parse::<f64>().ok()?,
            None => 1.0,
        };
        return Some(RGBAColor(channel(1)?, channel(2)?, channel(3)?, alpha));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(color))
        .map(|(_, rgb)| rgb.to_rgba())
}

/// Dash pattern of a line, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
enum Dash {
    Solid,
    Dashed { size: u32, spacing: u32 },
}

/// Parses a dash name or an explicit `dash, gap` length list
///
/// Only the first dash and gap of a list are used; a single length is used
/// for both.
fn parse_dash(dash: &str) -> Option<Dash> {
    let dash = dash.trim();
    let (size, spacing) = match dash {
        "solid" => return Some(Dash::Solid),
        "dot" => (3, 3),
        "dash" => (9, 9),
        "longdash" => (15, 15),
        "dashdot" => (9, 4),
        "longdashdot" => (15, 6),
        _ if DASH_LIST_PATTERN.is_match(dash) => {
            let lengths: Vec<u32> = dash
                .split(',')
                .map(|part| part.trim().trim_end_matches("px").parse::<f64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .ok()?
                .into_iter()
                .map(|length| length.round() as u32)
                .collect();
            let size = *lengths.first()?;
            (size, lengths.get(1).copied().unwrap_or(size))
        }
        _ => return None,
    };
    Some(Dash::Dashed { size, spacing })
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn chart_error<E: fmt::Display>(err: E) -> Error {
    generic_error(&format!("Failed to draw chart: {err}"))
}

/// Writes traces to an HTML chart
#[derive(Debug, Clone)]
pub struct Plotter {
    trace_lines: HashMap<Label, LineStyle>,
    output: PathBuf,
    title: String,
}

impl Plotter {
    pub fn new(trace_lines: HashMap<Label, LineStyle>, output: impl Into<PathBuf>) -> Self {
        Plotter {
            trace_lines,
            output: output.into(),
            title: "Termination times".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Renders the chart for the given traces
    ///
    /// # Errors
    /// Fails when a trace's line style is invalid
    pub fn render(&self, traces: &[&TraceData]) -> Result<String> {
        let mut svg = String::new();
        self.draw_chart(&mut svg, traces)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #333; }}
</style>
</head>
<body>
{svg}
</body>
</html>
"#,
            title = escape_html(&self.title),
        ))
    }

    /// Renders the chart and writes it to the output file
    pub fn plot(&self, traces: &[&TraceData]) -> Result<()> {
        let html = self.render(traces)?;
        fs::write(&self.output, html)
            .map_err(|e| file_operation_error(e, self.output.clone(), "write"))?;
        info!("Chart written to {}", self.output.display());
        Ok(())
    }

    fn draw_chart(&self, svg: &mut String, traces: &[&TraceData]) -> Result<()> {
        let x_max = visible_x_max(traces);

        let root = SVGBackend::with_string(svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(0.0..x_max, 0.0..1.0)
            .map_err(chart_error)?;

        chart
            .configure_mesh()
            .x_desc("Termination time")
            .y_desc("Fraction of destinations")
            .draw()
            .map_err(chart_error)?;

        for (index, trace) in traces.iter().enumerate() {
            let style = self
                .trace_lines
                .get(trace.label())
                .cloned()
                .unwrap_or_default();
            style.validate()?;

            let line_style = style.shape_style(index)?;
            let points = shape_points(&visible_points(trace, x_max), style.shape);

            let series = match style.dash() {
                Dash::Solid => chart.draw_series(LineSeries::new(points, line_style)),
                Dash::Dashed { size, spacing } => {
                    chart.draw_series(DashedLineSeries::new(points, size, spacing, line_style))
                }
            }
            .map_err(chart_error)?;

            series
                .label(trace.label().as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + LEGEND_LINE_LENGTH, y)], line_style)
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

impl TraceSink for Plotter {
    fn write_traces(&self, traces: &TraceSet) -> Result<()> {
        let traces: Vec<&TraceData> = traces.traces().collect();
        self.plot(&traces)
    }
}

/// Right end of the x axis: one bin past the point where every trace has
/// dropped to zero, so long empty tails do not squash the chart
fn visible_x_max(traces: &[&TraceData]) -> f64 {
    let last_nonzero = traces
        .iter()
        .filter_map(|trace| {
            let last = trace.y().iter().rposition(|&y| y > 0.0)?;
            trace.x().get(last + 1).or(trace.x().get(last)).copied()
        })
        .fold(0.0_f64, f64::max);

    let step = traces
        .iter()
        .find_map(|trace| match trace.x() {
            [first, second, ..] => Some(second - first),
            _ => None,
        })
        .unwrap_or(1.0);

    let x_max = last_nonzero + step;
    if x_max > 0.0 { x_max } else { 1.0 }
}

/// Points of a trace up to `x_max`, without the inner points of flat runs
fn visible_points(trace: &TraceData, x_max: f64) -> Vec<(f64, f64)> {
    let points: Vec<(f64, f64)> = trace.points().filter(|(x, _)| *x <= x_max).collect();

    points
        .iter()
        .enumerate()
        .filter(|(i, (_, y))| {
            let flat_before = *i > 0 && points[i - 1].1 == *y;
            let flat_after = points.get(i + 1).is_some_and(|next| next.1 == *y);
            !(flat_before && flat_after)
        })
        .map(|(_, point)| *point)
        .collect()
}

/// Expands the points of a step-shaped line with its corner points
fn shape_points(points: &[(f64, f64)], shape: LineShape) -> Vec<(f64, f64)> {
    if shape == LineShape::Linear || points.len() < 2 {
        return points.to_vec();
    }

    let mut shaped = vec![points[0]];
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        let mid_x = (x0 + x1) / 2.0;
        let mid_y = (y0 + y1) / 2.0;
        match shape {
            LineShape::Hv => shaped.push((x1, y0)),
            LineShape::Vh => shaped.push((x0, y1)),
            LineShape::Hvh => shaped.extend([(mid_x, y0), (mid_x, y1)]),
            LineShape::Vhv => shaped.extend([(x0, mid_y), (x1, mid_y)]),
            LineShape::Linear => {}
        }
        shaped.push((x1, y1));
    }
    shaped
}
