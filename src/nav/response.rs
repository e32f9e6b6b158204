//! Conversion of engine paths into the turn-by-turn wire protocol.
//!
//! The engine reports paths as point sequences plus sign-coded instructions.
//! This module resolves instruction text for the request locale and derives
//! the voice and banner announcement metadata from the instructions' native
//! distance and interval fields. It never recomputes geometry.

use serde::Serialize;

use crate::engine::{Instruction, ResponsePath, RouteResult, TurnSign};
use crate::error::NavError;
use crate::geo::initial_bearing;
use crate::nav::request::{Point, RouteRequest};
use crate::translate::TranslationMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnits {
    Metric,
    Imperial,
}

impl DistanceUnits {
    pub fn parse(raw: &str) -> Result<Self, NavError> {
        match raw {
            "metric" => Ok(DistanceUnits::Metric),
            "imperial" => Ok(DistanceUnits::Imperial),
            _ => Err(NavError::Validation(format!(
                "units must be 'metric' or 'imperial', got '{raw}'"
            ))),
        }
    }
}

/// Path geometry encoding requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometries {
    Polyline,
    Polyline6,
    GeoJson,
}

impl Geometries {
    pub fn parse(raw: &str) -> Result<Self, NavError> {
        match raw {
            "polyline" => Ok(Geometries::Polyline),
            "polyline6" => Ok(Geometries::Polyline6),
            "geojson" => Ok(Geometries::GeoJson),
            _ => Err(NavError::Validation(format!(
                "geometries must be 'polyline', 'polyline6' or 'geojson', got '{raw}'"
            ))),
        }
    }
}

/// Output switches derived from the inbound request.
#[derive(Debug, Clone)]
pub struct ResponseOptions {
    pub instructions: bool,
    pub voice_instructions: bool,
    pub banner_instructions: bool,
    pub units: DistanceUnits,
    pub geometries: Geometries,
    pub locale: String,
}

// ============ Wire model ============

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub code: String,
    pub routes: Vec<NavRoute>,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Serialize)]
pub struct NavRoute {
    pub distance: f64,
    pub duration: f64,
    pub weight: f64,
    pub weight_name: String,
    pub geometry: serde_json::Value,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Serialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
    pub summary: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Serialize)]
pub struct RouteStep {
    pub distance: f64,
    pub duration: f64,
    pub name: String,
    pub geometry: serde_json::Value,
    pub maneuver: StepManeuver,
    #[serde(rename = "voiceInstructions", skip_serializing_if = "Option::is_none")]
    pub voice_instructions: Option<Vec<VoiceInstruction>>,
    #[serde(rename = "bannerInstructions", skip_serializing_if = "Option::is_none")]
    pub banner_instructions: Option<Vec<BannerInstruction>>,
    pub driving_side: String,
}

#[derive(Debug, Serialize)]
pub struct StepManeuver {
    pub location: [f64; 2],
    pub bearing_before: f64,
    pub bearing_after: f64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<u32>,
    pub instruction: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceInstruction {
    #[serde(rename = "distanceAlongGeometry")]
    pub distance_along_geometry: f64,
    pub announcement: String,
    #[serde(rename = "ssmlAnnouncement")]
    pub ssml_announcement: String,
}

#[derive(Debug, Serialize)]
pub struct BannerInstruction {
    #[serde(rename = "distanceAlongGeometry")]
    pub distance_along_geometry: f64,
    pub primary: BannerText,
}

#[derive(Debug, Serialize)]
pub struct BannerText {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    pub components: Vec<BannerComponent>,
}

#[derive(Debug, Serialize)]
pub struct BannerComponent {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Waypoint {
    pub name: String,
    pub location: [f64; 2],
}

// ============ Conversion ============

/// Convert an engine result into the protocol payload.
pub fn convert(
    result: &RouteResult,
    request: &RouteRequest,
    opts: &ResponseOptions,
    tr: &TranslationMap,
) -> NavigateResponse {
    NavigateResponse {
        code: "Ok".to_string(),
        routes: result
            .paths
            .iter()
            .map(|path| convert_path(path, opts, tr))
            .collect(),
        waypoints: request
            .points
            .iter()
            .map(|p| Waypoint {
                name: String::new(),
                location: [p.lon, p.lat],
            })
            .collect(),
    }
}

fn convert_path(path: &ResponsePath, opts: &ResponseOptions, tr: &TranslationMap) -> NavRoute {
    let duration = path.time_ms as f64 / 1000.0;
    let steps = if opts.instructions {
        convert_steps(path, opts, tr)
    } else {
        Vec::new()
    };

    NavRoute {
        distance: path.distance_m,
        duration,
        weight: duration,
        weight_name: "routability".to_string(),
        geometry: geometry_value(&path.points, opts.geometries),
        legs: vec![RouteLeg {
            distance: path.distance_m,
            duration,
            summary: String::new(),
            steps,
        }],
    }
}

fn convert_steps(path: &ResponsePath, opts: &ResponseOptions, tr: &TranslationMap) -> Vec<RouteStep> {
    let texts: Vec<String> = path
        .instructions
        .iter()
        .map(|ins| instruction_text(ins, &opts.locale, tr))
        .collect();

    path.instructions
        .iter()
        .enumerate()
        .map(|(i, ins)| {
            let next = path.instructions.get(i + 1);
            let next_text = texts.get(i + 1).cloned();

            RouteStep {
                distance: ins.distance_m,
                duration: ins.time_ms as f64 / 1000.0,
                name: ins.name.clone(),
                geometry: geometry_value(step_points(path, ins), opts.geometries),
                maneuver: maneuver(path, i, ins, &texts[i]),
                voice_instructions: opts.voice_instructions.then(|| {
                    voice_for_step(ins.distance_m, next_text.as_deref(), opts, tr)
                }),
                banner_instructions: opts.banner_instructions.then(|| {
                    banner_for_step(ins.distance_m, i, next, next_text.as_deref())
                }),
                driving_side: "right".to_string(),
            }
        })
        .collect()
}

fn step_points<'a>(path: &'a ResponsePath, ins: &Instruction) -> &'a [Point] {
    let (start, end) = ins.interval;
    let end = end.min(path.points.len().saturating_sub(1));
    let start = start.min(end);
    &path.points[start..=end]
}

fn maneuver(path: &ResponsePath, index: usize, ins: &Instruction, text: &str) -> StepManeuver {
    let at = ins.interval.0.min(path.points.len().saturating_sub(1));
    let location = path
        .points
        .get(at)
        .map(|p| [p.lon, p.lat])
        .unwrap_or([0.0, 0.0]);

    let bearing_before = if at == 0 {
        0.0
    } else {
        segment_bearing(&path.points, at - 1)
    };
    let bearing_after = if at + 1 < path.points.len() {
        segment_bearing(&path.points, at)
    } else {
        bearing_before
    };

    let (kind, modifier) = maneuver_kind(index, ins.sign);
    StepManeuver {
        location,
        bearing_before,
        bearing_after,
        kind: kind.to_string(),
        modifier: modifier.map(str::to_string),
        exit: ins.exit_number,
        instruction: text.to_string(),
    }
}

fn segment_bearing(points: &[Point], from: usize) -> f64 {
    let a = points[from];
    let b = points[from + 1];
    initial_bearing(a.lat, a.lon, b.lat, b.lon)
}

fn maneuver_kind(index: usize, sign: TurnSign) -> (&'static str, Option<&'static str>) {
    if index == 0 {
        return ("depart", None);
    }
    match sign {
        TurnSign::Finish | TurnSign::ReachedVia => ("arrive", None),
        TurnSign::Roundabout => ("roundabout", None),
        TurnSign::Continue => ("continue", Some("straight")),
        TurnSign::UTurn => ("turn", Some("uturn")),
        TurnSign::SharpLeft => ("turn", Some("sharp left")),
        TurnSign::Left => ("turn", Some("left")),
        TurnSign::SlightLeft => ("turn", Some("slight left")),
        TurnSign::SlightRight => ("turn", Some("slight right")),
        TurnSign::Right => ("turn", Some("right")),
        TurnSign::SharpRight => ("turn", Some("sharp right")),
    }
}

fn sign_key(sign: TurnSign) -> &'static str {
    match sign {
        TurnSign::UTurn => "u_turn",
        TurnSign::SharpLeft => "sharp_left",
        TurnSign::Left => "left",
        TurnSign::SlightLeft => "slight_left",
        TurnSign::Continue => "continue",
        TurnSign::SlightRight => "slight_right",
        TurnSign::Right => "right",
        TurnSign::SharpRight => "sharp_right",
        TurnSign::Finish => "finish",
        TurnSign::ReachedVia => "reached_via",
        TurnSign::Roundabout => "roundabout_exit",
    }
}

fn instruction_text(ins: &Instruction, locale: &str, tr: &TranslationMap) -> String {
    if ins.sign == TurnSign::Roundabout {
        return tr.tr1(
            locale,
            "roundabout_exit",
            &ins.exit_number.unwrap_or(1).to_string(),
        );
    }
    let base = tr.tr(locale, sign_key(ins.sign));
    if ins.name.is_empty() {
        base
    } else {
        format!("{} {}", base, tr.tr1(locale, "onto", &ins.name))
    }
}

/// Voice announcements for one step, telling the driver about the next
/// maneuver. One distant announcement when the step is long enough, and one
/// final announcement right before the maneuver point.
fn voice_for_step(
    step_distance: f64,
    next_text: Option<&str>,
    opts: &ResponseOptions,
    tr: &TranslationMap,
) -> Vec<VoiceInstruction> {
    let Some(next_text) = next_text else {
        return Vec::new();
    };

    let thresholds: &[(f64, &str, &str)] = match opts.units {
        DistanceUnits::Metric => &[
            (2000.0, "in_km", "2"),
            (1000.0, "in_km", "1"),
            (400.0, "in_m", "400"),
        ],
        DistanceUnits::Imperial => &[
            (3218.0, "in_mi", "2"),
            (1609.0, "in_mi", "1"),
            (244.0, "in_ft", "800"),
        ],
    };

    let mut out = Vec::new();
    for &(meters, key, amount) in thresholds {
        if step_distance > meters * 1.25 {
            let announcement =
                format!("{}, {}", tr.tr1(&opts.locale, key, amount), next_text);
            out.push(voice(meters, announcement));
            break;
        }
    }
    out.push(voice(step_distance.min(80.0), next_text.to_string()));
    out
}

fn voice(distance_along_geometry: f64, announcement: String) -> VoiceInstruction {
    let ssml_announcement = format!("<speak>{announcement}</speak>");
    VoiceInstruction {
        distance_along_geometry,
        announcement,
        ssml_announcement,
    }
}

/// The banner shows the upcoming maneuver for the whole step.
fn banner_for_step(
    step_distance: f64,
    index: usize,
    next: Option<&Instruction>,
    next_text: Option<&str>,
) -> Vec<BannerInstruction> {
    let (Some(next), Some(next_text)) = (next, next_text) else {
        return Vec::new();
    };

    let (kind, modifier) = maneuver_kind(index + 1, next.sign);
    let text = if next.name.is_empty() {
        next_text.to_string()
    } else {
        next.name.clone()
    };
    vec![BannerInstruction {
        distance_along_geometry: step_distance,
        primary: BannerText {
            components: vec![BannerComponent { text: text.clone() }],
            text,
            kind: kind.to_string(),
            modifier: modifier.map(str::to_string),
        },
    }]
}

// ============ Geometry encoding ============

fn geometry_value(points: &[Point], geometries: Geometries) -> serde_json::Value {
    match geometries {
        Geometries::GeoJson => serde_json::json!({
            "type": "LineString",
            "coordinates": points.iter().map(|p| [p.lon, p.lat]).collect::<Vec<_>>(),
        }),
        Geometries::Polyline => serde_json::Value::String(encode_polyline(points, 1e5)),
        Geometries::Polyline6 => serde_json::Value::String(encode_polyline(points, 1e6)),
    }
}

/// Standard polyline encoding with the given precision factor.
fn encode_polyline(points: &[Point], factor: f64) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;
    for p in points {
        let lat = (p.lat * factor).round() as i64;
        let lon = (p.lon * factor).round() as i64;
        encode_signed(lat - prev_lat, &mut out);
        encode_signed(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }
    out
}

fn encode_signed(value: i64, out: &mut String) {
    let mut v = value << 1;
    if value < 0 {
        v = !v;
    }
    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) + 63) as u8) as char);
        v >>= 5;
    }
    out.push(((v + 63) as u8) as char);
}
