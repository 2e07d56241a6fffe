use crate::canvas::{BLACK, DocumentInfo, PdfCanvas, Rgb, WHITE};
use crate::charts::{ChartImage, ChartRenderer, PlottersChartRenderer};
use crate::error::ReportError;
use crate::fonts::Font;
use crate::logo::load_logo;
use analytics::{RadarProfile, ReturnComparison, summary_rows};
use chrono::{NaiveDate, NaiveDateTime};
use configuration::ReportSettings;
use core_types::{IndicatorSet, Sector};
use std::io::Cursor;

// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const HEADER_HEIGHT: f32 = 100.0;
pub const FOOTER_HEIGHT: f32 = 70.0;
// Where content starts on continuation pages and how close it may come to the footer.
const CONTINUATION_TOP: f32 = PAGE_HEIGHT - 60.0;
const FOOTER_CLEARANCE: f32 = 10.0;
const CONTENT_LEFT: f32 = 70.0;
const LOGO_WIDTH: f32 = 80.0;
const CHART_WIDTH: f32 = 256.0;
const CHART_GAP: f32 = 20.0;
const RULE_COLOR: Rgb = [230, 230, 230];
const WARNING_COLOR: Rgb = [153, 27, 27];

/// The finished export: a complete PDF held in memory.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    /// `Report_<sector>_<YYYYMMDD>.pdf`
    pub file_name: String,
    /// Non-fatal problems that were printed into the document instead.
    pub warnings: Vec<String>,
    pub pages: usize,
}

impl RenderedReport {
    /// A seekable reader over the document.
    pub fn into_cursor(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }
}

/// Download name for a report generated on `date`.
pub fn report_file_name(sector: Sector, date: NaiveDate) -> String {
    format!("Report_{}_{}.pdf", sector.file_label(), date.format("%Y%m%d"))
}

/// Lays out the fixed one-page VAIC report.
pub struct ReportFormatter<R = PlottersChartRenderer> {
    settings: ReportSettings,
    renderer: R,
}

impl<R: ChartRenderer> ReportFormatter<R> {
    pub fn new(settings: ReportSettings, renderer: R) -> Self {
        Self { settings, renderer }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Renders the report for one calculation.
    ///
    /// Refuses with [`ReportError::NothingToExport`] while value added is
    /// still zero. Chart failures never abort the render; they become a
    /// warning line in the document and an entry in `warnings`.
    pub fn render(
        &self,
        metrics: &IndicatorSet,
        sector: Sector,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedReport, ReportError> {
        if metrics.va == 0.0 {
            return Err(ReportError::NothingToExport);
        }

        let mut canvas = PdfCanvas::new(PAGE_WIDTH, PAGE_HEIGHT);
        let mut warnings = Vec::new();

        self.draw_header(&mut canvas);
        let mut y = PAGE_HEIGHT - HEADER_HEIGHT - 40.0;

        canvas.text(
            CONTENT_LEFT,
            y,
            "VAIC and Profitability Analysis Results",
            Font::Bold,
            16.0,
            BLACK,
        );
        y -= 30.0;
        canvas.text(
            CONTENT_LEFT,
            y,
            &format!("Selected sector: {}", sector.label()),
            Font::Regular,
            12.0,
            BLACK,
        );
        y -= 25.0;
        canvas.text(
            CONTENT_LEFT,
            y,
            &format!("Generated on: {}", generated_at.format("%d/%m/%Y %H:%M")),
            Font::Regular,
            12.0,
            BLACK,
        );
        y -= 40.0;

        canvas.text(CONTENT_LEFT, y, "Calculated indicators:", Font::Bold, 12.0, BLACK);
        y -= 20.0;
        for row in summary_rows(metrics) {
            self.ensure_room(&mut canvas, &mut y, 20.0);
            canvas.text(90.0, y, &format!("• {}:", row.label), Font::Regular, 11.0, BLACK);
            let value = if row.currency {
                format!("${}", row.value)
            } else {
                row.value
            };
            canvas.text(300.0, y, &value, Font::Bold, 11.0, BLACK);
            y -= 20.0;
        }
        y -= 30.0;

        let charts = self
            .renderer
            .radar(&RadarProfile::from_indicators(metrics))
            .and_then(|radar| Ok((radar, self.renderer.returns(&ReturnComparison::from_indicators(metrics))?)));
        match charts {
            Ok((radar, returns)) => {
                let height = chart_size(&radar).1.max(chart_size(&returns).1);
                self.ensure_room(&mut canvas, &mut y, height);
                let left = (PAGE_WIDTH - 2.0 * CHART_WIDTH - CHART_GAP) / 2.0;
                draw_chart(&mut canvas, &radar, left, y);
                draw_chart(&mut canvas, &returns, left + CHART_WIDTH + CHART_GAP, y);
            }
            Err(e) => {
                let warning = format!("Warning: charts could not be generated: {e}");
                tracing::warn!(error = %e, "Report rendered without charts.");
                self.ensure_room(&mut canvas, &mut y, 20.0);
                canvas.text(CONTENT_LEFT, y, &warning, Font::Regular, 10.0, WARNING_COLOR);
                warnings.push(warning);
            }
        }

        self.draw_footer(&mut canvas);
        let pages = canvas.page_count();
        let info = DocumentInfo {
            title: format!("{} - {}", self.settings.title, sector.label()),
            creation_date: generated_at.format("D:%Y%m%d%H%M%S").to_string(),
        };
        let bytes = canvas.finish(&info, self.settings.compress)?;
        let file_name = report_file_name(sector, generated_at.date());

        tracing::info!(%file_name, pages, size = bytes.len(), "Report rendered.");

        Ok(RenderedReport {
            bytes,
            file_name,
            warnings,
            pages,
        })
    }

    /// Starts a new page when `needed` points would run into the footer.
    fn ensure_room(&self, canvas: &mut PdfCanvas, y: &mut f32, needed: f32) {
        if *y - needed < FOOTER_HEIGHT + FOOTER_CLEARANCE {
            self.draw_footer(canvas);
            canvas.new_page();
            *y = CONTINUATION_TOP;
        }
    }

    fn draw_header(&self, canvas: &mut PdfCanvas) {
        let band_bottom = PAGE_HEIGHT - HEADER_HEIGHT;
        canvas.fill_rect(0.0, band_bottom, PAGE_WIDTH, HEADER_HEIGHT, self.settings.header_color);

        if let Some(logo) = self.settings.logo_path.as_deref().and_then(load_logo) {
            let natural = logo.scaled_height(LOGO_WIDTH);
            let height = natural.min(HEADER_HEIGHT - 10.0);
            // Tall logos shrink in both directions to keep their aspect ratio.
            let width = if natural > 0.0 { LOGO_WIDTH * height / natural } else { LOGO_WIDTH };
            let bottom = band_bottom + (HEADER_HEIGHT - height) / 2.0;
            canvas.image(&logo, 50.0, bottom, width, height);
        }

        let center = PAGE_WIDTH / 2.0;
        canvas.centered_text(center, PAGE_HEIGHT - 60.0, &self.settings.title, Font::Bold, 20.0, WHITE);
        canvas.centered_text(
            center,
            PAGE_HEIGHT - 85.0,
            &self.settings.institution,
            Font::Regular,
            14.0,
            WHITE,
        );
        canvas.line(
            (50.0, band_bottom - 5.0),
            (PAGE_WIDTH - 50.0, band_bottom - 5.0),
            3.0,
            RULE_COLOR,
        );
    }

    fn draw_footer(&self, canvas: &mut PdfCanvas) {
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, FOOTER_HEIGHT, self.settings.header_color);
        canvas.centered_text(
            PAGE_WIDTH / 2.0,
            FOOTER_HEIGHT / 2.0,
            &self.settings.footer,
            Font::Bold,
            12.0,
            WHITE,
        );
    }
}

/// Drawn size of a chart in its column.
///
/// Charts are `CHART_WIDTH` wide unless that would make them taller than a
/// page can hold; those shrink in both directions to fit.
fn chart_size(chart: &ChartImage) -> (f32, f32) {
    let natural = chart.image.scaled_height(CHART_WIDTH);
    let usable = CONTINUATION_TOP - FOOTER_HEIGHT - FOOTER_CLEARANCE;
    if natural > usable {
        (CHART_WIDTH * usable / natural, usable)
    } else {
        (CHART_WIDTH, natural)
    }
}

/// Draws `chart` centred in the column starting at `left`, hanging from `top`,
/// and overlays its labels.
fn draw_chart(canvas: &mut PdfCanvas, chart: &ChartImage, left: f32, top: f32) {
    let (width, height) = chart_size(chart);
    let left = left + (CHART_WIDTH - width) / 2.0;
    canvas.image(&chart.image, left, top - height, width, height);

    let scale = width / chart.image.width.max(1) as f32;
    for label in &chart.labels {
        let size = label.size as f32 * scale;
        let x = left + label.x as f32 * width;
        // Label positions mark the vertical centre; PDF text sits on its baseline.
        let y = top - label.y as f32 * height - size * 0.35;
        let font = if label.bold { Font::Bold } else { Font::Regular };
        canvas.aligned_text(x, y, &label.text, font, size, BLACK, label.align);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_follows_sector_and_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(report_file_name(Sector::Commercial, date), "Report_Commercial_20250307.pdf");
        assert_eq!(report_file_name(Sector::RealEstate, date), "Report_RealEstate_20250307.pdf");
    }

    fn chart(width: u32, height: u32) -> ChartImage {
        ChartImage {
            image: crate::canvas::RasterImage {
                width,
                height,
                rgb: vec![0; (width * height * 3) as usize],
            },
            labels: Vec::new(),
        }
    }

    #[test]
    fn ordinary_charts_fill_their_column() {
        let (width, height) = chart_size(&chart(550, 400));
        assert_eq!(width, CHART_WIDTH);
        assert!((height - CHART_WIDTH * 400.0 / 550.0).abs() < 1e-3);
    }

    #[test]
    fn tall_charts_shrink_to_the_usable_page_height() {
        let (width, height) = chart_size(&chart(550, 1600));
        let usable = CONTINUATION_TOP - FOOTER_HEIGHT - FOOTER_CLEARANCE;
        assert!((height - usable).abs() < 1e-3);
        assert!((width / height - 550.0 / 1600.0).abs() < 1e-4);
    }
}
