mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, TrackingAPI, API};
use crate::server::handlers::session;

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    // The watch spans the whole session: acquired before serving, released
    // after shutdown.
    if let Err(err) = api.start_watching().await {
        tracing::warn!("live position unavailable: {}", err.message);
    }

    let app = Router::new()
        .route("/state", get(session::state))
        .route("/search", post(session::search))
        .route("/queries/:role", post(session::set_query))
        .route("/voice/:role", post(session::capture))
        .layer(Extension(api.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    api.stop_watching().await;
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
    }
}
