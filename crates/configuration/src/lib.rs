use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{ChartSettings, Config, LoggingSettings, ReportSettings, ServerSettings};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Reads the optional TOML file at `path` (or `config.toml`), then applies
/// `VAIC_<SECTION>__<KEY>` environment variables on top, deserializes the
/// result into our strongly-typed `Config` struct and validates it.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("VAIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Loads the configuration from an in-memory TOML document.
pub fn load_config_str(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
