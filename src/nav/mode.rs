//! Routing strategy selection from the request shape.
//!
//! The precomputed hierarchy answers plain two-point queries fastest, but it
//! cannot honor per-waypoint directional restrictions or guarantee through
//! traversal at interior stops. Requests that need either fall back to
//! flexible search.

use crate::error::NavError;
use crate::nav::bearing::Bearing;
use crate::nav::request::Hints;
use crate::params;

/// Derive the engine hints for a request with `n_points` waypoints.
pub fn derive_hints(
    n_points: usize,
    bearings: &[Option<Bearing>],
    pass_through_requested: bool,
    way_point_max_distance: f64,
) -> Hints {
    let flexible =
        n_points > 2 || has_interior_bearing(bearings) || pass_through_requested;

    let mut hints = Hints::new();
    hints.put_bool(params::CH_DISABLE, flexible);
    hints.put_bool(params::PASS_THROUGH, flexible);
    hints.put_float(params::WAY_POINT_MAX_DISTANCE, way_point_max_distance);
    hints
}

/// Whether any waypoint other than the first or last carries a bearing.
fn has_interior_bearing(bearings: &[Option<Bearing>]) -> bool {
    if bearings.len() < 3 {
        return false;
    }
    bearings[1..bearings.len() - 1]
        .iter()
        .any(|b| b.is_some())
}

/// Roundabout exit numbers are always part of the output protocol and the
/// capability cannot be turned off.
pub fn check_roundabout_exits(roundabout_exits: bool) -> Result<(), NavError> {
    if !roundabout_exits {
        return Err(NavError::Validation(
            "roundabout_exits=false is not supported, roundabout exit numbers are always returned"
                .to_string(),
        ));
    }
    Ok(())
}
