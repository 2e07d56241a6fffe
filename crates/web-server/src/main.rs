use anyhow::Context;
use std::path::Path;

// Entry point for `cargo run -p web-server`: serves the dashboard with the
// settings from `config.toml` and the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(Some(Path::new(configuration::DEFAULT_CONFIG_FILE)))
        .context("Failed to load configuration")?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(config).await
}
