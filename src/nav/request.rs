//! Internal route request model shared between the handlers and the engine.
//!
//! A request is assembled fresh for every incoming query and handed to the
//! routing engine once; nothing in here is cached or shared across queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::nav::bearing::Bearing;

/// A waypoint in `[lon, lat]` order. The sequence order is the route order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Point {
    fn from(coords: [f64; 2]) -> Self {
        Self {
            lon: coords[0],
            lat: coords[1],
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.lon, p.lat]
    }
}

/// A single hint value. Hints are weakly typed on the wire; the typed
/// getters below apply defaults instead of failing on a wrong type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HintValue {
    Bool(bool),
    Float(f64),
    Str(String),
}

/// Ordered key/value hints consumed by the routing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hints(BTreeMap<String, HintValue>);

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.0.insert(key.to_string(), HintValue::Bool(value));
    }

    pub fn put_float(&mut self, key: &str, value: f64) {
        self.0.insert(key.to_string(), HintValue::Float(value));
    }

    pub fn put_str(&mut self, key: &str, value: &str) {
        self.0
            .insert(key.to_string(), HintValue::Str(value.to_string()));
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(HintValue::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key) {
            Some(HintValue::Float(f)) => *f,
            _ => default,
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(HintValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<HintValue> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The request handed to the routing engine, either assembled from a GET
/// path query or posted directly as a body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRequest {
    pub profile: String,
    pub points: Vec<Point>,
    /// Per-point bearing constraints; empty means unconstrained.
    pub bearings: Vec<Option<Bearing>>,
    /// Road classes or environments the engine must not snap onto.
    pub snap_preventions: Vec<String>,
    /// Per-edge detail series requested alongside the path.
    pub path_details: Vec<String>,
    pub locale: String,
    pub hints: Hints,
}
