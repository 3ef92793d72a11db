//! Herald - broadcast service binary
//!
//! Boots the facade, spawns the event pump, and serves the HTTP control
//! surface.

mod routes;

use std::net::SocketAddr;

use herald_core::{Config, Herald};

use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    herald_core::init_logging();

    let config = Config::from_env();
    let port = config.port;

    let (herald, events) = Herald::start(config)?;
    let app = routes::create_router(AppState { herald, events });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Herald listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
