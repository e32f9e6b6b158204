//! Turn-by-turn navigation endpoint.
//!
//! HTTP layer translating the navigation protocol into routing engine
//! queries and back.
//!
//! # Endpoints
//!
//! - `GET /navigate/directions/v5/gh/{profile}/{coordinates}` - path-style query
//! - `POST /navigate/directions/v5/gh` - prebuilt route request body
//! - `GET /health` - health check

pub mod api;
pub mod bearing;
pub mod mode;
pub mod request;
pub mod response;
pub mod state;

pub use state::{AppState, NavConfig};

/// Bind and run the navigation server.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = api::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("navigation server listening on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
