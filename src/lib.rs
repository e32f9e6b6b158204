//! Request-boundary layer for turn-by-turn navigation over a routing engine.
//!
//! This crate decides which graph edges are eligible for GPS snapping and
//! path search, translates an external navigation request (multi-point path,
//! per-point bearing constraints, instruction options) into internal routing
//! parameters, and converts the computed path back into a turn/voice/banner
//! instruction protocol.
//!
//! The graph storage, spatial index and search algorithm live behind the
//! [`engine::RoutingEngine`] trait; locale text behind
//! [`translate::TranslationMap`].

pub mod edge;
pub mod engine;
pub mod error;
pub mod ev;
pub mod filter;
pub mod geo;
pub mod nav;
pub mod params;
pub mod translate;

pub use edge::Edge;
pub use error::NavError;
pub use filter::{AccessFilter, EdgeFilter, SnapPreventionEdgeFilter};
pub use nav::{AppState, NavConfig};
