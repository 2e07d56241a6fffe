use thiserror::Error;

/// Guidance shown when an export is requested before any calculation.
pub const NOTHING_TO_EXPORT: &str = "Please calculate the indicators first on the Indicators page.";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart drawing failed: {0}")]
    Drawing(String),

    #[error("chart area {width}x{height} is too small to draw on")]
    InvalidDimensions { width: u32, height: u32 },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{}", NOTHING_TO_EXPORT)]
    NothingToExport,

    #[error("Failed to encode the PDF document: {0}")]
    Pdf(#[from] lopdf::Error),
}
