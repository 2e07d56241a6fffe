use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use configuration::{Config, ReportSettings};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AppState, router};

fn state() -> Arc<AppState> {
    let config = Config {
        report: ReportSettings {
            logo_path: None,
            ..ReportSettings::default()
        },
        ..Config::default()
    };
    Arc::new(AppState::new(&config))
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (status, _, body) = send(router(state()), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn export_before_calculation_is_a_conflict() {
    let (status, body) = send_json(router(state()), get("/export/pdf")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Please calculate the indicators first on the Indicators page."
    );
}

#[tokio::test]
async fn calculate_then_export_downloads_the_report() {
    let state = state();

    let (status, headers, _) = send(
        router(state.clone()),
        form("/calculate", "it=1000&cv=400&hc=300&ce=2000&sector=commercial"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    let (status, headers, body) = send(router(state.clone()), get("/export/pdf")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"Report_Commercial_"));
    assert!(disposition.ends_with(".pdf\""));
    assert!(body.starts_with(b"%PDF-"));

    let (status, _, api_body) = send(router(state), get("/api/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(api_body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn negative_form_input_is_rejected() {
    let state = state();
    let (status, body) = send_json(
        router(state.clone()),
        form("/calculate", "it=-5&cv=400&hc=300&ce=2000&sector=primary"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

    let (_, session) = send_json(router(state), get("/api/session")).await;
    assert_eq!(session["indicators"]["va"], 0.0);
}

#[tokio::test]
async fn json_calculation_updates_the_session() {
    let state = state();
    let (status, indicators) = send_json(
        router(state.clone()),
        json_post(
            "/api/indicators",
            json!({
                "inputs": { "it": 1000.0, "cv": 400.0, "hc": 300.0, "ce": 2000.0 },
                "sector": "Commercial"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(indicators["va"], 600.0);
    assert!((indicators["vaic"].as_f64().unwrap() - 2.8).abs() < 1e-12);

    let (_, session) = send_json(router(state.clone()), get("/api/session")).await;
    assert_eq!(session["sector"], "commercial");
    assert_eq!(session["page"], "indicators");

    let (_, charts) = send_json(router(state.clone()), get("/api/charts")).await;
    assert_eq!(charts["radar"]["axes"].as_array().unwrap().len(), 4);
    assert_eq!(charts["returns"]["bars"][0]["label"], "ROA");

    let (status, session) = send_json(router(state), json_post("/api/session/reset", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["indicators"]["va"], 0.0);
    assert_eq!(session["sector"], "real_estate");
}

#[tokio::test]
async fn unknown_sector_falls_back_to_real_estate() {
    let state = state();
    send(
        router(state.clone()),
        form("/calculate", "it=1000&cv=400&hc=300&ce=2000&sector=unknown"),
    )
    .await;
    let (_, session) = send_json(router(state), get("/api/session")).await;
    assert_eq!(session["sector"], "real_estate");
}

#[tokio::test]
async fn navigation_drives_the_rendered_page() {
    let state = state();

    let (_, _, home) = send(router(state.clone()), get("/")).await;
    assert!(String::from_utf8(home).unwrap().contains("Intangible Indicators and Profitability Platform"));

    let (status, _, _) = send(router(state.clone()), form("/navigate", "to=export")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (_, _, export) = send(router(state.clone()), get("/")).await;
    assert!(String::from_utf8(export).unwrap().contains("Please calculate the indicators first"));

    send(router(state.clone()), form("/navigate", "to=help")).await;
    let (_, _, help) = send(router(state.clone()), get("/?section=relationships")).await;
    assert!(String::from_utf8(help).unwrap().contains("Conceptual logic of influence"));

    send(router(state.clone()), form("/reset", "")).await;
    let (_, session) = send_json(router(state), get("/api/session")).await;
    assert_eq!(session["page"], "indicators");
}

#[tokio::test]
async fn malformed_form_fields_get_a_json_error() {
    let (status, body) = send_json(
        router(state()),
        form("/calculate", "it=lots&cv=400&hc=300&ce=2000&sector=primary"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body["error"].as_str().unwrap().is_empty());

    let (status, body) = send_json(router(state()), form("/calculate", "it=1000&sector=primary")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, body) = send_json(router(state()), form("/navigate", "to=nowhere")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_bodies_get_a_json_error() {
    let (status, body) = send_json(
        router(state()),
        json_post("/api/indicators", json!({ "inputs": { "it": "many" } })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let untyped = Request::post("/api/indicators")
        .body(Body::from(r#"{"inputs":{"it":1,"cv":0,"hc":1,"ce":1}}"#))
        .unwrap();
    let (status, body) = send_json(router(state()), untyped).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn a_poisoned_session_keeps_serving() {
    let state = state();
    let poisoner = state.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.session.lock().unwrap();
        panic!("handler crashed while holding the session");
    })
    .join();
    assert!(state.session.is_poisoned());

    let (status, _) = send_json(router(state.clone()), get("/api/session")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        router(state.clone()),
        form("/calculate", "it=1000&cv=400&hc=300&ce=2000&sector=commercial"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (status, _, body) = send(router(state), get("/export/pdf")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn zero_inputs_are_calculated_but_not_exportable() {
    let state = state();
    send(
        router(state.clone()),
        form("/calculate", "it=0&cv=0&hc=0&ce=0&sector=commercial"),
    )
    .await;
    let (_, session) = send_json(router(state.clone()), get("/api/session")).await;
    assert_eq!(session["calculated"], true);
    assert_eq!(session["indicators"]["roa"], 0.017000167);

    let (_, _, page) = send(router(state.clone()), get("/")).await;
    assert!(String::from_utf8(page).unwrap().contains("0.0170"));

    let (status, _) = send_json(router(state), get("/export/pdf")).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
