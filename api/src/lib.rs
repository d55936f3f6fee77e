//! HTTP facade over the Divvy token ledger
//!
//! A thin JSON boundary: inbound value transfers arrive as `/deposit`
//! requests, everything else maps one-to-one onto the token surface.

mod error;
pub mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

pub async fn start_server(
    addr: SocketAddr,
    state: ApiState,
) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let app = routes::create_routes().with_state(state).layer(cors);

    tracing::info!("API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
