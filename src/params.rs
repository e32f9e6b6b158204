//! Request hint keys understood by the routing engine.
//!
//! Hints are per-query key/value pairs attached to a route request. The keys
//! below are the stable vocabulary shared between the navigation layer and
//! the engine.

/// Disable the precomputed hierarchy and fall back to flexible search.
pub const CH_DISABLE: &str = "ch.disable";

/// Forbid reversing direction at intermediate waypoints.
pub const PASS_THROUGH: &str = "pass_through";

/// Maximum distance in which a waypoint may be snapped to a candidate edge.
pub const WAY_POINT_MAX_DISTANCE: &str = "way_point_max_distance";

/// Road classes or road environments that must never be snapped onto.
pub const SNAP_PREVENTION: &str = "snap_prevention";

/// Top-level request type marker required on posted route requests.
pub const TYPE: &str = "type";

/// Marker value identifying the turn-by-turn navigation protocol.
pub const MAPBOX_REQUEST_TYPE: &str = "mapbox";

/// Response language. Only derived from the HTTP request, never a body hint.
pub const LANGUAGE: &str = "language";

/// Routing profile selector (car, bike, foot).
pub const PROFILE: &str = "profile";

/// Encoded value key for legal speed limits.
pub const MAX_SPEED: &str = "max_speed";
