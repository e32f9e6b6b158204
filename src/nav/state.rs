//! Shared server state for the navigation API.

use std::sync::Arc;

use serde::Deserialize;

use crate::engine::RoutingEngine;
use crate::error::NavError;
use crate::filter::{AccessFilter, SnapPreventionEdgeFilter};
use crate::translate::TranslationMap;

/// Server configuration. Everything here is fixed at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Locale used when a request names none, or names an untranslated one.
    pub default_locale: String,
    /// Radius in which a raw coordinate may be snapped to a candidate edge.
    pub way_point_max_distance: f64,
    /// Road classes or environments GPS points must never be snapped onto.
    pub snap_preventions: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            way_point_max_distance: 1.0,
            snap_preventions: vec!["ferry".to_string()],
        }
    }
}

/// Read-only state shared by all request workers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn RoutingEngine>,
    pub translations: Arc<TranslationMap>,
    pub config: NavConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the state and validate the static configuration once, so a bad
    /// snap prevention label fails startup instead of the first request.
    pub fn new(engine: Arc<dyn RoutingEngine>, config: NavConfig) -> Result<Self, NavError> {
        SnapPreventionEdgeFilter::new(
            Arc::new(AccessFilter),
            engine.encoding_manager(),
            &config.snap_preventions,
        )?;

        let translations = Arc::new(TranslationMap::new(&config.default_locale));
        Ok(Self {
            engine,
            translations,
            config,
        })
    }
}
