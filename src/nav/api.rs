//! HTTP handlers for the navigation protocol.
//!
//! Two entry points share one pipeline: the GET endpoint parses waypoints
//! and constraints out of a path-style URL, the POST endpoint accepts an
//! already-built route request body. Both validate, derive the routing
//! hints, call the engine once and convert the result.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::NavError;
use crate::nav::bearing::parse_bearings;
use crate::nav::mode;
use crate::nav::request::{HintValue, Point, RouteRequest};
use crate::nav::response::{
    convert, DistanceUnits, Geometries, NavigateResponse, ResponseOptions,
};
use crate::nav::state::AppState;
use crate::params;

/// Structured error body returned on every failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/navigate/directions/v5/gh/{profile}/{coordinates}",
            get(directions_get),
        )
        .route("/navigate/directions/v5/gh", post(directions_post))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(GlobalConcurrencyLimitLayer::new(1024))
        .with_state(state)
}

/// Query parameters of the GET endpoint.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectionsQuery {
    pub bearings: String,
    pub roundabout_exits: bool,
    pub instructions: bool,
    pub voice_instructions: bool,
    pub banner_instructions: bool,
    pub units: String,
    pub geometries: String,
    pub overview: String,
    pub language: String,
}

impl Default for DirectionsQuery {
    fn default() -> Self {
        Self {
            bearings: String::new(),
            roundabout_exits: true,
            instructions: true,
            voice_instructions: false,
            banner_instructions: false,
            units: "metric".to_string(),
            geometries: "polyline6".to_string(),
            overview: "simplified".to_string(),
            language: String::new(),
        }
    }
}

async fn directions_get(
    State(state): State<AppState>,
    Path((profile, coordinates)): Path<(String, String)>,
    Query(query): Query<DirectionsQuery>,
) -> Response {
    match calc_route_get(&state, &profile, &coordinates, &query) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn directions_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RouteRequest>,
) -> Response {
    match calc_route_post(&state, &headers, body) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn error_response(err: NavError) -> Response {
    tracing::debug!("request rejected: {err}");
    let body = ErrorResponse {
        message: err.to_string(),
        code: err.code().to_string(),
    };
    (err.status(), Json(body)).into_response()
}

fn calc_route_get(
    state: &AppState,
    profile: &str,
    coordinates: &str,
    query: &DirectionsQuery,
) -> Result<NavigateResponse, NavError> {
    let points = parse_points(coordinates)?;

    let bearings = parse_bearings(&query.bearings)?;
    if !bearings.is_empty() && bearings.len() != points.len() {
        return Err(NavError::Validation(format!(
            "Number of bearings ({}) must match number of points ({})",
            bearings.len(),
            points.len()
        )));
    }

    mode::check_roundabout_exits(query.roundabout_exits)?;

    if state.engine.navigation_mode(profile).is_none() {
        return Err(NavError::Validation(format!(
            "Profile '{profile}' not supported"
        )));
    }

    let units = DistanceUnits::parse(&query.units)?;
    let geometries = Geometries::parse(&query.geometries)?;
    let locale = if query.language.is_empty() {
        state.config.default_locale.clone()
    } else {
        query.language.clone()
    };

    let mut hints = mode::derive_hints(
        points.len(),
        &bearings,
        false,
        state.config.way_point_max_distance,
    );
    hints.put_str("overview", &query.overview);

    let request = RouteRequest {
        profile: profile.to_string(),
        points,
        bearings,
        snap_preventions: state.config.snap_preventions.clone(),
        path_details: Vec::new(),
        locale: locale.clone(),
        hints,
    };

    let result = state.engine.route(&request)?;

    let opts = ResponseOptions {
        instructions: query.instructions,
        voice_instructions: query.voice_instructions,
        banner_instructions: query.banner_instructions,
        units,
        geometries,
        locale,
    };
    Ok(convert(&result, &request, &opts, &state.translations))
}

fn calc_route_post(
    state: &AppState,
    headers: &HeaderMap,
    mut request: RouteRequest,
) -> Result<NavigateResponse, NavError> {
    if request.hints.get_str(params::TYPE) != Some(params::MAPBOX_REQUEST_TYPE) {
        return Err(NavError::Validation(format!(
            "The 'type' hint must be '{}'",
            params::MAPBOX_REQUEST_TYPE
        )));
    }
    if request.hints.contains_key(params::LANGUAGE) {
        return Err(NavError::Validation(
            "It is illegal to pass the 'language' hint, the response language is derived from the request locale"
                .to_string(),
        ));
    }
    request.hints.remove(params::TYPE);

    if let Some(HintValue::Str(profile)) = request.hints.remove(params::PROFILE) {
        request.profile = profile;
    }
    if state.engine.navigation_mode(&request.profile).is_none() {
        return Err(NavError::Validation(format!(
            "Profile '{}' not supported",
            request.profile
        )));
    }

    if !request.bearings.is_empty() && request.bearings.len() != request.points.len() {
        return Err(NavError::Validation(format!(
            "Number of bearings ({}) must match number of points ({})",
            request.bearings.len(),
            request.points.len()
        )));
    }

    // The response language comes from the HTTP request, never the body.
    request.locale = accept_language(headers)
        .unwrap_or_else(|| state.config.default_locale.clone());

    if request.snap_preventions.is_empty() {
        request.snap_preventions = state.config.snap_preventions.clone();
    }
    if request.path_details.is_empty()
        && state
            .engine
            .encoding_manager()
            .has_encoded_value(params::MAX_SPEED)
    {
        request.path_details = vec![
            params::MAX_SPEED.to_string(),
            "time".to_string(),
            "distance".to_string(),
        ];
    }

    let pass_through = request.hints.get_bool(params::PASS_THROUGH, false);
    let derived = mode::derive_hints(
        request.points.len(),
        &request.bearings,
        pass_through,
        state.config.way_point_max_distance,
    );
    request.hints.put_bool(
        params::CH_DISABLE,
        derived.get_bool(params::CH_DISABLE, false),
    );
    request.hints.put_bool(
        params::PASS_THROUGH,
        derived.get_bool(params::PASS_THROUGH, false),
    );
    request.hints.put_float(
        params::WAY_POINT_MAX_DISTANCE,
        derived.get_float(params::WAY_POINT_MAX_DISTANCE, 0.0),
    );

    let result = state.engine.route(&request)?;

    let opts = ResponseOptions {
        instructions: true,
        voice_instructions: true,
        banner_instructions: true,
        units: match request.hints.get_str("units") {
            Some("imperial") => DistanceUnits::Imperial,
            _ => DistanceUnits::Metric,
        },
        geometries: Geometries::Polyline6,
        locale: request.locale.clone(),
    };
    Ok(convert(&result, &request, &opts, &state.translations))
}

/// First language tag of the `Accept-Language` header, if any.
fn accept_language(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(axum::http::header::ACCEPT_LANGUAGE)?.to_str().ok()?;
    let first = raw.split(',').next()?.split(';').next()?.trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

/// Parse the `;`-separated `lon,lat` pairs of the GET path segment.
fn parse_points(coordinates: &str) -> Result<Vec<Point>, NavError> {
    let mut points = Vec::new();
    for pair in coordinates.split(';') {
        let malformed = || NavError::Validation(format!("Point '{pair}' must be 'lon,lat'"));
        let (lon, lat) = pair.split_once(',').ok_or_else(malformed)?;
        let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;
        let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
        points.push(Point::new(lon, lat));
    }
    if points.len() < 2 {
        return Err(NavError::Validation(format!(
            "At least two points must be specified, got {}",
            points.len()
        )));
    }
    Ok(points)
}
