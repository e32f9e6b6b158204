//! Straight-line demo engine.
//!
//! Routes every leg as the direct great-circle segment between consecutive
//! waypoints. No graph data is required, which makes it useful for local
//! serving and for exercising the request pipeline end to end. The snap
//! prevention list is still honored: each waypoint is vetted against a
//! candidate edge before the path is produced.

use std::sync::Arc;

use crate::edge::Edge;
use crate::error::NavError;
use crate::ev::EncodingManager;
use crate::filter::{AccessFilter, EdgeFilter, SnapPreventionEdgeFilter};
use crate::geo::haversine_distance;
use crate::nav::request::RouteRequest;
use crate::params;

use super::{Instruction, Mode, ResponsePath, RouteResult, RoutingEngine, TurnSign};

pub struct DemoEngine {
    em: EncodingManager,
}

impl DemoEngine {
    pub fn new() -> Self {
        Self {
            em: EncodingManager::new().with_encoded_value(params::MAX_SPEED),
        }
    }

    /// Candidate edge a waypoint would snap onto. The demo network is all
    /// residential surface streets.
    fn candidate_edge(&self, index: usize, mode: Mode) -> Edge {
        Edge::new(index as u32, index as u32 + 1, 0.0)
            .with_road_class(crate::ev::RoadClass::Residential)
            .with_speed(mode.default_speed_kmh())
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingEngine for DemoEngine {
    fn route(&self, request: &RouteRequest) -> Result<RouteResult, NavError> {
        let mode = self
            .navigation_mode(&request.profile)
            .ok_or_else(|| NavError::Routing(format!("Profile '{}' not found", request.profile)))?;

        if request.points.len() < 2 {
            return Err(NavError::Routing(format!(
                "Point list must contain at least 2 points, got {}",
                request.points.len()
            )));
        }

        let snap_filter = SnapPreventionEdgeFilter::new(
            Arc::new(AccessFilter),
            &self.em,
            &request.snap_preventions,
        )?;
        for (i, _) in request.points.iter().enumerate() {
            if !snap_filter.accept(&self.candidate_edge(i, mode)) {
                return Err(NavError::Routing(format!(
                    "Cannot snap point {i} to an eligible edge"
                )));
            }
        }

        let speed_ms = mode.default_speed_kmh() / 3.6;
        let mut instructions = Vec::new();
        let mut distance_m = 0.0;
        let mut time_ms = 0u64;

        for i in 0..request.points.len() - 1 {
            let from = request.points[i];
            let to = request.points[i + 1];
            let seg_distance = haversine_distance(from.lat, from.lon, to.lat, to.lon);
            let seg_time = (seg_distance / speed_ms * 1000.0).round() as u64;
            distance_m += seg_distance;
            time_ms += seg_time;

            instructions.push(Instruction {
                sign: if i == 0 {
                    TurnSign::Continue
                } else {
                    TurnSign::ReachedVia
                },
                name: String::new(),
                distance_m: seg_distance,
                time_ms: seg_time,
                interval: (i, i + 1),
                exit_number: None,
            });
        }

        let last = request.points.len() - 1;
        instructions.push(Instruction {
            sign: TurnSign::Finish,
            name: String::new(),
            distance_m: 0.0,
            time_ms: 0,
            interval: (last, last),
            exit_number: None,
        });

        let mut path = ResponsePath {
            distance_m,
            time_ms,
            points: request.points.clone(),
            instructions,
            details: Default::default(),
        };
        for detail in &request.path_details {
            let series = match detail.as_str() {
                "time" => serde_json::json!([[0, last, time_ms]]),
                "distance" => serde_json::json!([[0, last, distance_m]]),
                params::MAX_SPEED => serde_json::json!([[0, last, mode.default_speed_kmh()]]),
                _ => continue,
            };
            path.details.insert(detail.clone(), series);
        }

        Ok(RouteResult { paths: vec![path] })
    }

    fn navigation_mode(&self, profile: &str) -> Option<Mode> {
        Mode::from_profile(profile)
    }

    fn encoding_manager(&self) -> &EncodingManager {
        &self.em
    }
}
