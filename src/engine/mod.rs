//! Routing engine interface consumed by the navigation layer.
//!
//! The graph storage, spatial index and search algorithm live behind the
//! [`RoutingEngine`] trait. The navigation layer builds a request, makes a
//! single synchronous `route` call and converts the result; it never reaches
//! into the graph itself.

pub mod demo;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::ev::EncodingManager;
use crate::nav::request::{Point, RouteRequest};

/// Transportation mode a routing profile maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Car,
    Bike,
    Foot,
}

impl Mode {
    pub fn from_profile(profile: &str) -> Option<Mode> {
        match profile {
            "car" => Some(Mode::Car),
            "bike" => Some(Mode::Bike),
            "foot" => Some(Mode::Foot),
            _ => None,
        }
    }

    /// Free-flow speed used when the graph carries no better estimate.
    pub fn default_speed_kmh(self) -> f64 {
        match self {
            Mode::Car => 80.0,
            Mode::Bike => 18.0,
            Mode::Foot => 5.0,
        }
    }
}

/// Turn signal attached to an instruction by the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnSign {
    UTurn,
    SharpLeft,
    Left,
    SlightLeft,
    Continue,
    SlightRight,
    Right,
    SharpRight,
    Finish,
    ReachedVia,
    Roundabout,
}

/// One turn instruction of a computed path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub sign: TurnSign,
    /// Street or ferry name, empty when unnamed.
    pub name: String,
    pub distance_m: f64,
    pub time_ms: u64,
    /// Range of path point indices this instruction covers.
    pub interval: (usize, usize),
    /// Exit number, only set for roundabout instructions.
    pub exit_number: Option<u32>,
}

/// A single computed path with its geometry and instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePath {
    pub distance_m: f64,
    pub time_ms: u64,
    pub points: Vec<Point>,
    pub instructions: Vec<Instruction>,
    /// Requested per-edge detail series, keyed by detail name.
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Result of one routing call, best path first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteResult {
    pub paths: Vec<ResponsePath>,
}

impl RouteResult {
    pub fn best(&self) -> Option<&ResponsePath> {
        self.paths.first()
    }
}

/// The external routing engine.
///
/// Implementations must provide a thread-safe read path; one `route` call
/// may block the calling worker for the duration of the search but holds no
/// lock owned by the navigation layer.
pub trait RoutingEngine: Send + Sync {
    /// Execute the search. Engine failures are reported as
    /// [`NavError::Routing`] and surfaced to the caller unmodified.
    fn route(&self, request: &RouteRequest) -> Result<RouteResult, NavError>;

    /// Transportation mode for a profile name, `None` when unsupported.
    fn navigation_mode(&self, profile: &str) -> Option<Mode>;

    /// Registry of encoded values present in the graph.
    fn encoding_manager(&self) -> &EncodingManager;
}
