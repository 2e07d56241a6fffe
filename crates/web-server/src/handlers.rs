use crate::{AppState, error::AppError, pages};
use analytics::{RadarProfile, ReturnComparison, SessionState};
use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use core_types::{FinancialInputs, HelpSection, IndicatorSet, Page, Sector};
use maud::Markup;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub section: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub to: Page,
}

#[derive(Debug, Deserialize)]
pub struct CalculateForm {
    pub it: f64,
    pub cv: f64,
    pub hc: f64,
    pub ce: f64,
    #[serde(default)]
    pub sector: String,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorRequest {
    pub inputs: FinancialInputs,
    /// Unknown or missing labels select the default sector.
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub radar: RadarProfile,
    pub returns: ReturnComparison,
}

/// # GET /
/// Renders whichever page the session is currently on.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Markup {
    let session = state.session().clone();
    let section = query
        .section
        .as_deref()
        .map(HelpSection::from_label_lenient)
        .unwrap_or_default();
    pages::render(&session, section, &state.charts)
}

/// # POST /navigate
pub async fn navigate(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NavigateForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    state.session().navigate(form.to);
    Ok(Redirect::to("/"))
}

/// # POST /calculate
/// Validates the form, recomputes the indicators and returns to the dashboard.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let inputs = FinancialInputs::new(form.it, form.cv, form.hc, form.ce)?;
    let sector = Sector::from_label_lenient(&form.sector);
    state.session().calculate(&state.engine, inputs, sector);
    Ok(Redirect::to("/"))
}

/// # POST /reset
pub async fn reset(State(state): State<Arc<AppState>>) -> Redirect {
    state.session().reset();
    Redirect::to("/")
}

/// # GET /export/pdf, GET /api/report
/// Streams the PDF for the current results as an attachment.
pub async fn export_pdf(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let (indicators, sector) = {
        let session = state.session();
        (session.indicators, session.sector)
    };

    let generated_at = chrono::Local::now().naive_local();
    let report = state.formatter.render(&indicators, sector, generated_at)?;
    for warning in &report.warnings {
        tracing::warn!(file_name = %report.file_name, %warning, "Report exported with a warning.");
    }

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

/// # GET /api/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.session().clone())
}

/// # POST /api/indicators
/// Calculates the indicators for the posted inputs and stores them in the session.
pub async fn post_indicators(
    State(state): State<Arc<AppState>>,
    request: Result<Json<IndicatorRequest>, JsonRejection>,
) -> Result<Json<IndicatorSet>, AppError> {
    let Json(request) = request?;
    request.inputs.validate()?;
    let sector = request
        .sector
        .as_deref()
        .map(Sector::from_label_lenient)
        .unwrap_or_default();
    let indicators = *state
        .session()
        .calculate(&state.engine, request.inputs, sector);
    Ok(Json(indicators))
}

/// # POST /api/session/reset
pub async fn reset_session(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    let mut session = state.session();
    session.reset();
    Json(session.clone())
}

/// # GET /api/charts
/// The chart series for the current results, for clients that draw their own.
pub async fn get_charts(State(state): State<Arc<AppState>>) -> Json<ChartSeries> {
    let indicators = state.session().indicators;
    Json(ChartSeries {
        radar: RadarProfile::from_indicators(&indicators),
        returns: ReturnComparison::from_indicators(&indicators),
    })
}
