//! # VAIC Web Dashboard
//!
//! Serves the four dashboard pages (Home, Indicators, Export, Help), their
//! form actions, a small JSON API over the same session and the PDF download.
//!
//! There is one logical session per server process. It lives behind a plain
//! `std::sync::Mutex` that handlers only hold for the synchronous
//! calculate/render step.

use analytics::{IndicatorEngine, SessionState};
use axum::{
    Router,
    routing::{get, post},
};
use configuration::{ChartSettings, Config};
use reporter::{PlottersChartRenderer, ReportFormatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod pages;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub session: Mutex<SessionState>,
    pub engine: IndicatorEngine,
    pub formatter: ReportFormatter,
    pub charts: ChartSettings,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Mutex::new(SessionState::new()),
            engine: IndicatorEngine::new(),
            formatter: ReportFormatter::new(
                config.report.clone(),
                PlottersChartRenderer::new(config.charts.clone()),
            ),
            charts: config.charts.clone(),
        }
    }

    /// Locks the session. A panic in another handler leaves the state as it
    /// was last written, which is still a valid session, so poisoning is ignored.
    pub fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        // --- Dashboard pages and form actions ---
        .route("/", get(handlers::index))
        .route("/navigate", post(handlers::navigate))
        .route("/calculate", post(handlers::calculate))
        .route("/reset", post(handlers::reset))
        .route("/export/pdf", get(handlers::export_pdf))
        // --- JSON API ---
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/session", get(handlers::get_session))
        .route("/api/indicators", post(handlers::post_indicators))
        .route("/api/session/reset", post(handlers::reset_session))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/report", get(handlers::export_pdf))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr();
    let app = router(Arc::new(AppState::new(&config)));

    tracing::info!(%addr, "Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
