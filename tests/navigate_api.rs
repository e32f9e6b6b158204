//! End-to-end tests for the navigation API.
//!
//! The router is driven directly with `tower::ServiceExt::oneshot` and a
//! scripted engine that records every request it receives, so the tests can
//! assert both the wire behavior and the hints handed to the engine.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use butterfly_navigate::engine::{
    Instruction, Mode, ResponsePath, RouteResult, RoutingEngine, TurnSign,
};
use butterfly_navigate::ev::EncodingManager;
use butterfly_navigate::nav::api::build_router;
use butterfly_navigate::nav::request::{Point, RouteRequest};
use butterfly_navigate::nav::{AppState, NavConfig};
use butterfly_navigate::{params, NavError};

/// Engine double that records requests and replies with one fixed path.
struct FakeEngine {
    em: EncodingManager,
    captured: Mutex<Vec<RouteRequest>>,
}

impl FakeEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            em: EncodingManager::new().with_encoded_value(params::MAX_SPEED),
            captured: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> RouteRequest {
        self.captured
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("engine was never called")
    }
}

impl RoutingEngine for FakeEngine {
    fn route(&self, request: &RouteRequest) -> Result<RouteResult, NavError> {
        self.captured.lock().unwrap().push(request.clone());

        let points = if request.points.len() >= 2 {
            request.points.clone()
        } else {
            vec![Point::new(4.35, 50.85), Point::new(4.40, 50.86)]
        };
        let last = points.len() - 1;
        Ok(RouteResult {
            paths: vec![ResponsePath {
                distance_m: 1500.0,
                time_ms: 90_000,
                instructions: vec![
                    Instruction {
                        sign: TurnSign::Continue,
                        name: "Rue Neuve".to_string(),
                        distance_m: 1500.0,
                        time_ms: 90_000,
                        interval: (0, last),
                        exit_number: None,
                    },
                    Instruction {
                        sign: TurnSign::Finish,
                        name: String::new(),
                        distance_m: 0.0,
                        time_ms: 0,
                        interval: (last, last),
                        exit_number: None,
                    },
                ],
                points,
                details: BTreeMap::new(),
            }],
        })
    }

    fn navigation_mode(&self, profile: &str) -> Option<Mode> {
        Mode::from_profile(profile)
    }

    fn encoding_manager(&self) -> &EncodingManager {
        &self.em
    }
}

/// Engine double that always fails the search.
struct FailingEngine {
    em: EncodingManager,
    message: String,
}

impl RoutingEngine for FailingEngine {
    fn route(&self, _request: &RouteRequest) -> Result<RouteResult, NavError> {
        Err(NavError::Routing(self.message.clone()))
    }

    fn navigation_mode(&self, profile: &str) -> Option<Mode> {
        Mode::from_profile(profile)
    }

    fn encoding_manager(&self) -> &EncodingManager {
        &self.em
    }
}

fn app(engine: Arc<dyn RoutingEngine>) -> axum::Router {
    build_router(AppState::new(engine, NavConfig::default()).unwrap())
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_json(
    app: axum::Router,
    body: serde_json::Value,
    accept_language: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/navigate/directions/v5/gh")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(lang) = accept_language {
        builder = builder.header(header::ACCEPT_LANGUAGE, lang);
    }
    send(
        app,
        builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn get_rejects_bearing_count_mismatch() {
    let engine = FakeEngine::new();
    let (status, body) = get(
        app(engine),
        "/navigate/directions/v5/gh/car/1.0,2.0;3.0,4.0?bearings=100,1",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Number of bearings"));
    assert_eq!(body["code"], "InvalidArgument");
}

#[tokio::test]
async fn get_rejects_disabled_roundabout_exits() {
    let engine = FakeEngine::new();
    let (status, body) = get(
        app(engine),
        "/navigate/directions/v5/gh/car/1,1;2,2?roundabout_exits=false",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("roundabout"));
}

#[tokio::test]
async fn get_with_two_points_keeps_the_fast_path() {
    let engine = FakeEngine::new();
    let (status, body) = get(
        app(engine.clone()),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "Ok");

    let request = engine.last_request();
    assert_eq!(request.points.len(), 2);
    assert!(!request.hints.get_bool(params::CH_DISABLE, false));
    assert!(!request.hints.get_bool(params::PASS_THROUGH, false));
    assert_eq!(
        request.hints.get_float(params::WAY_POINT_MAX_DISTANCE, 0.0),
        1.0
    );
}

#[tokio::test]
async fn get_with_three_points_falls_back_to_flexible_search() {
    let engine = FakeEngine::new();
    let (status, _) = get(
        app(engine.clone()),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86;4.45,50.87",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let request = engine.last_request();
    assert_eq!(request.points.len(), 3);
    assert!(request.hints.get_bool(params::CH_DISABLE, false));
    assert!(request.hints.get_bool(params::PASS_THROUGH, false));
}

#[tokio::test]
async fn get_carries_the_configured_snap_preventions() {
    let engine = FakeEngine::new();
    let (status, _) = get(
        app(engine.clone()),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        engine.last_request().snap_preventions,
        vec!["ferry".to_string()]
    );
}

#[tokio::test]
async fn get_attaches_voice_and_banner_instructions_on_request() {
    let engine = FakeEngine::new();
    let (status, body) = get(
        app(engine),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86?voice_instructions=true&banner_instructions=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let step = &body["routes"][0]["legs"][0]["steps"][0];
    assert!(step["voiceInstructions"].is_array());
    assert!(step["bannerInstructions"].is_array());
    assert_eq!(step["maneuver"]["type"], "depart");
}

#[tokio::test]
async fn get_without_voice_flags_omits_the_announcements() {
    let engine = FakeEngine::new();
    let (status, body) = get(
        app(engine),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let step = &body["routes"][0]["legs"][0]["steps"][0];
    assert!(step["voiceInstructions"].is_null());
    assert!(step["bannerInstructions"].is_null());
}

#[tokio::test]
async fn post_without_type_marker_is_rejected() {
    let engine = FakeEngine::new();
    let (status, body) = post_json(app(engine), serde_json::json!({}), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("type"));
}

#[tokio::test]
async fn post_with_language_hint_is_rejected() {
    let engine = FakeEngine::new();
    let body = serde_json::json!({
        "hints": {"type": "mapbox", "language": "fr"}
    });
    let (status, body) = post_json(app(engine), body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msg = body["message"].as_str().unwrap().to_lowercase();
    assert!(msg.contains("language") || msg.contains("illegal"), "{msg}");
}

#[tokio::test]
async fn post_with_type_and_profile_routes_and_requests_time_details() {
    let engine = FakeEngine::new();
    let body = serde_json::json!({
        "points": [[4.35, 50.85], [4.40, 50.86]],
        "hints": {"type": "mapbox", "profile": "car"}
    });
    let (status, response) = post_json(app(engine.clone()), body, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["code"], "Ok");

    let request = engine.last_request();
    assert_eq!(request.profile, "car");
    assert!(request.path_details.contains(&"time".to_string()));
}

#[tokio::test]
async fn post_locale_is_derived_from_the_accept_language_header() {
    let engine = FakeEngine::new();
    let body = serde_json::json!({
        "points": [[4.35, 50.85], [4.40, 50.86]],
        "hints": {"type": "mapbox", "profile": "car"}
    });
    let (status, response) = post_json(app(engine.clone()), body, Some("de-DE,de;q=0.9")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(engine.last_request().locale, "de-DE");

    // The finish instruction is announced in German.
    let steps = response["routes"][0]["legs"][0]["steps"].as_array().unwrap();
    let arrive = &steps[steps.len() - 1]["maneuver"]["instruction"];
    assert_eq!(arrive, "Sie haben Ihr Ziel erreicht");
}

#[tokio::test]
async fn routing_errors_surface_with_their_own_message() {
    let engine = Arc::new(FailingEngine {
        em: EncodingManager::new(),
        message: "Connection between locations not found".to_string(),
    });
    let (status, body) = get(
        app(engine),
        "/navigate/directions/v5/gh/car/4.35,50.85;4.40,50.86",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "NoRoute");
    assert_eq!(
        body["message"].as_str().unwrap(),
        "Connection between locations not found"
    );
}

#[tokio::test]
async fn health_endpoint_responds() {
    let engine = FakeEngine::new();
    let (status, body) = get(app(engine), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
