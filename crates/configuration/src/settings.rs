use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so the application runs without
/// a `config.toml` at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSettings,
    pub charts: ChartSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// Rejects values that would make rendering or serving impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.title.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "report.title must not be empty".to_string(),
            ));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(ConfigError::ValidationError(format!(
                "charts.width and charts.height must be positive (got {}x{})",
                self.charts.width, self.charts.height
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Branding and layout options for the exported PDF.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Title printed in the header band.
    pub title: String,
    /// Institution line printed under the title.
    pub institution: String,
    /// Text printed in the footer band.
    pub footer: String,
    /// Optional logo drawn at the left of the header band.
    pub logo_path: Option<PathBuf>,
    /// RGB colour of the header and footer bands.
    pub header_color: [u8; 3],
    /// Flate-compress the PDF content streams.
    pub compress: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "INTANGIBLE INDICATORS".to_string(),
            institution: "Universidad Técnica de Ambato | Ecuador".to_string(),
            footer: "Research Project - Universidad Técnica de Ambato".to_string(),
            logo_path: Some(PathBuf::from("assets/logo.png")),
            header_color: [120, 31, 25],
            compress: true,
        }
    }
}

/// Pixel size and font of the rendered charts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 550,
            height: 400,
            font_family: "sans-serif".to_string(),
        }
    }
}

/// Where the web dashboard listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
        }
    }
}

/// Log level and optional rolling log file directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
