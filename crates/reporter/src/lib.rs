//! # VAIC Report Formatter
//!
//! Turns an `IndicatorSet` into a fixed-layout PDF held entirely in memory,
//! and draws the two dashboard charts for both the PDF and the browser.
//!
//! ## Public API
//!
//! - `ReportFormatter`: lays out the report and returns a `RenderedReport`.
//! - `ChartRenderer`: the chart-drawing capability; `PlottersChartRenderer`
//!   is the default implementation, `radar_svg` / `returns_svg` serve the
//!   dashboard.
//! - `PdfCanvas`: the low-level page surface the formatter draws on.
//! - `ReportError` / `ChartError`: the failures this crate can report.

pub mod canvas;
pub mod charts;
pub mod error;
pub mod fonts;
pub mod formatter;
pub mod logo;

pub use canvas::{PdfCanvas, RasterImage, TextAlign};
pub use charts::{ChartImage, ChartLabel, ChartRenderer, PlottersChartRenderer, radar_svg, returns_svg};
pub use error::{ChartError, NOTHING_TO_EXPORT, ReportError};
pub use formatter::{RenderedReport, ReportFormatter, report_file_name};
