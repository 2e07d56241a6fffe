//! The two dashboard charts, drawn with plotters.
//!
//! Raster output contains shapes only and hands its text back as
//! [`ChartLabel`]s so the PDF can set them in vector type. SVG output embeds
//! the same labels as `<text>` elements.

use crate::canvas::{RasterImage, TextAlign};
use crate::error::ChartError;
use analytics::series::BLUE;
use analytics::{RadarProfile, ReturnComparison};
use configuration::ChartSettings;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;

const TITLE_HEIGHT: i32 = 40;
const GRID: RGBColor = RGBColor(210, 214, 220);
const AXIS_TEXT: RGBColor = RGBColor(17, 24, 39);

/// A piece of chart text positioned relative to the chart's size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabel {
    pub text: String,
    /// Anchor position as a fraction of the width, from the left edge.
    pub x: f64,
    /// Vertical centre of the text as a fraction of the height, from the top.
    pub y: f64,
    pub align: TextAlign,
    /// Font size in chart pixels.
    pub size: f64,
    pub bold: bool,
}

/// A rendered chart: the picture plus the text to lay over it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub image: RasterImage,
    pub labels: Vec<ChartLabel>,
}

/// The chart-drawing capability used by the report.
pub trait ChartRenderer {
    fn radar(&self, profile: &RadarProfile) -> Result<ChartImage, ChartError>;
    fn returns(&self, comparison: &ReturnComparison) -> Result<ChartImage, ChartError>;
}

/// Renders both charts into in-memory RGB bitmaps.
#[derive(Debug, Clone)]
pub struct PlottersChartRenderer {
    settings: ChartSettings,
}

impl PlottersChartRenderer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    fn render_bitmap<F>(&self, draw: F) -> Result<ChartImage, ChartError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<Vec<ChartLabel>, ChartError>,
    {
        let (width, height) = (self.settings.width, self.settings.height);
        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        let labels = {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            let labels = draw(&root)?;
            root.present().map_err(drawing_error)?;
            labels
        };
        Ok(ChartImage {
            image: RasterImage { width, height, rgb },
            labels,
        })
    }
}

impl ChartRenderer for PlottersChartRenderer {
    fn radar(&self, profile: &RadarProfile) -> Result<ChartImage, ChartError> {
        self.render_bitmap(|area| draw_radar(area, profile))
    }

    fn returns(&self, comparison: &ReturnComparison) -> Result<ChartImage, ChartError> {
        self.render_bitmap(|area| draw_returns(area, comparison))
    }
}

/// The radar profile as a standalone SVG document.
pub fn radar_svg(profile: &RadarProfile, settings: &ChartSettings) -> Result<String, ChartError> {
    render_svg(settings, |area| draw_radar(area, profile))
}

/// The ROA/ROE bars as a standalone SVG document.
pub fn returns_svg(comparison: &ReturnComparison, settings: &ChartSettings) -> Result<String, ChartError> {
    render_svg(settings, |area| draw_returns(area, comparison))
}

fn render_svg<F>(settings: &ChartSettings, draw: F) -> Result<String, ChartError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<Vec<ChartLabel>, ChartError>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (settings.width, settings.height))
            .into_drawing_area();
        let labels = draw(&root)?;
        draw_labels(&root, &labels, &settings.font_family)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}

fn drawing_error<E>(error: DrawingAreaErrorKind<E>) -> ChartError
where
    E: std::error::Error + Send + Sync,
{
    ChartError::Drawing(error.to_string())
}

fn plot_color(rgb: [u8; 3]) -> RGBColor {
    RGBColor(rgb[0], rgb[1], rgb[2])
}

fn checked_size<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    min_width: u32,
    min_height: u32,
) -> Result<(u32, u32), ChartError> {
    let (width, height) = area.dim_in_pixel();
    if width < min_width || height < min_height {
        return Err(ChartError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}

fn label(text: impl Into<String>, px: f64, py: f64, dims: (u32, u32), align: TextAlign, size: f64) -> ChartLabel {
    ChartLabel {
        text: text.into(),
        x: px / f64::from(dims.0),
        y: py / f64::from(dims.1),
        align,
        size,
        bold: false,
    }
}

/// Geometry of the radar: centre and outer radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub center: (f64, f64),
    pub radius: f64,
}

impl RadarGeometry {
    /// Fits the radar under the title band with room for the axis labels.
    pub fn fit(width: u32, height: u32) -> Self {
        let plot_height = f64::from(height) - f64::from(TITLE_HEIGHT);
        let center = (f64::from(width) / 2.0, f64::from(TITLE_HEIGHT) + plot_height / 2.0);
        let radius = f64::from(width).min(plot_height) / 2.0 - 40.0;
        Self { center, radius }
    }

    /// Spoke angle for axis `index` of `count`; the first axis points right
    /// and the rest follow counter-clockwise.
    pub fn angle(index: usize, count: usize) -> f64 {
        2.0 * PI * index as f64 / count.max(1) as f64
    }

    /// Pixel position of `value` on spoke `index`, scaled against `max`.
    pub fn point(&self, index: usize, count: usize, value: f64, max: f64) -> (f64, f64) {
        let fraction = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
        self.at(Self::angle(index, count), self.radius * fraction)
    }

    fn at(&self, angle: f64, distance: f64) -> (f64, f64) {
        (
            self.center.0 + distance * angle.cos(),
            self.center.1 - distance * angle.sin(),
        )
    }
}

fn pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_radar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profile: &RadarProfile,
) -> Result<Vec<ChartLabel>, ChartError> {
    let dims = checked_size(area, 120, 120)?;
    let geometry = RadarGeometry::fit(dims.0, dims.1);
    if geometry.radius < 10.0 {
        return Err(ChartError::InvalidDimensions {
            width: dims.0,
            height: dims.1,
        });
    }
    area.fill(&WHITE).map_err(drawing_error)?;

    let count = profile.axes.len();
    let center = pixel(geometry.center);
    let mut labels = vec![ChartLabel {
        bold: true,
        ..label(profile.title, f64::from(dims.0) / 2.0, 20.0, dims, TextAlign::Center, 16.0)
    }];

    // Rings with their radial values along the first spoke.
    for step in 1..=4 {
        let fraction = f64::from(step) / 4.0;
        let ring = (geometry.radius * fraction).round() as i32;
        area.draw(&Circle::new(center, ring, GRID.stroke_width(1)))
            .map_err(drawing_error)?;
        let (x, y) = geometry.at(PI / 8.0, geometry.radius * fraction);
        labels.push(label(
            format!("{:.1}", profile.radial_max * fraction),
            x,
            y,
            dims,
            TextAlign::Left,
            10.0,
        ));
    }

    for (index, axis) in profile.axes.iter().enumerate() {
        let angle = RadarGeometry::angle(index, count);
        let end = geometry.at(angle, geometry.radius);
        area.draw(&PathElement::new(vec![center, pixel(end)], GRID.stroke_width(1)))
            .map_err(drawing_error)?;

        let (x, y) = geometry.at(angle, geometry.radius + 18.0);
        let align = if angle.cos() > 0.3 {
            TextAlign::Left
        } else if angle.cos() < -0.3 {
            TextAlign::Right
        } else {
            TextAlign::Center
        };
        labels.push(label(axis.label, x, y, dims, align, 14.0));
    }

    let points: Vec<(i32, i32)> = profile
        .axes
        .iter()
        .enumerate()
        .map(|(index, axis)| pixel(geometry.point(index, count, axis.value, profile.radial_max)))
        .collect();
    let color = plot_color(BLUE);
    area.draw(&Polygon::new(points.clone(), color.mix(0.25).filled()))
        .map_err(drawing_error)?;
    let mut outline = points.clone();
    if let Some(first) = points.first() {
        outline.push(*first);
    }
    area.draw(&PathElement::new(outline, color.stroke_width(2)))
        .map_err(drawing_error)?;
    for point in points {
        area.draw(&Circle::new(point, 4, color.filled()))
            .map_err(drawing_error)?;
    }

    Ok(labels)
}

fn draw_returns<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    comparison: &ReturnComparison,
) -> Result<Vec<ChartLabel>, ChartError> {
    const LEFT: f64 = 60.0;
    const RIGHT: f64 = 80.0;
    const BOTTOM: f64 = 40.0;

    let dims = checked_size(area, 200, 120)?;
    let (width, height) = (f64::from(dims.0), f64::from(dims.1));
    area.fill(&WHITE).map_err(drawing_error)?;

    let mut labels = vec![ChartLabel {
        bold: true,
        ..label(comparison.title, width / 2.0, 20.0, dims, TextAlign::Center, 16.0)
    }];

    let (min, max) = comparison.value_range();
    let span = max - min;
    let lo = if min < 0.0 { min - 0.1 * span } else { 0.0 };
    let hi = if max > 0.0 { max + 0.1 * span } else { 0.0 };
    let (x0, x1) = (LEFT, width - RIGHT);
    let (top, bottom) = (f64::from(TITLE_HEIGHT), height - BOTTOM);
    let x_of = |v: f64| x0 + (v - lo) / (hi - lo) * (x1 - x0);

    // Vertical grid with tick values under the plot.
    for tick in 0..=4 {
        let value = lo + (hi - lo) * f64::from(tick) / 4.0;
        let x = x_of(value);
        area.draw(&PathElement::new(
            vec![pixel((x, top)), pixel((x, bottom))],
            GRID.stroke_width(1),
        ))
        .map_err(drawing_error)?;
        labels.push(label(format!("{value:.3}"), x, bottom + 14.0, dims, TextAlign::Center, 10.0));
    }
    area.draw(&PathElement::new(
        vec![pixel((x_of(0.0), top)), pixel((x_of(0.0), bottom))],
        AXIS_TEXT.stroke_width(1),
    ))
    .map_err(drawing_error)?;
    labels.push(label("Value", (x0 + x1) / 2.0, height - 10.0, dims, TextAlign::Center, 11.0));

    let band = (bottom - top) / comparison.bars.len().max(1) as f64;
    for (index, bar) in comparison.bars.iter().enumerate() {
        let band_top = top + band * index as f64;
        let (y0, y1) = (band_top + band * 0.2, band_top + band * 0.8);
        let (start, end) = (x_of(0.0), x_of(bar.value));
        area.draw(&Rectangle::new(
            [pixel((start.min(end), y0)), pixel((start.max(end), y1))],
            plot_color(bar.color).filled(),
        ))
        .map_err(drawing_error)?;

        let middle = (y0 + y1) / 2.0;
        labels.push(label(bar.label, x0 - 8.0, middle, dims, TextAlign::Right, 14.0));
        let (value_x, align) = if bar.value >= 0.0 {
            (end + 6.0, TextAlign::Left)
        } else {
            (end - 6.0, TextAlign::Right)
        };
        labels.push(label(bar.text.clone(), value_x, middle, dims, align, 14.0));
    }

    Ok(labels)
}

fn draw_labels<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    labels: &[ChartLabel],
    font_family: &str,
) -> Result<(), ChartError> {
    let (width, height) = area.dim_in_pixel();
    for chart_label in labels {
        let h_pos = match chart_label.align {
            TextAlign::Left => HPos::Left,
            TextAlign::Center => HPos::Center,
            TextAlign::Right => HPos::Right,
        };
        let weight = if chart_label.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        let style = FontDesc::new(FontFamily::Name(font_family), chart_label.size, weight)
            .color(&AXIS_TEXT)
            .pos(Pos::new(h_pos, VPos::Center));
        let position = pixel((
            chart_label.x * f64::from(width),
            chart_label.y * f64::from(height),
        ));
        area.draw(&Text::new(chart_label.text.as_str(), position, style))
            .map_err(drawing_error)?;
    }
    Ok(())
}
