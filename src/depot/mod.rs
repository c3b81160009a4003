pub mod handlers;

use crate::{appwrite::AdminClient, cli::globals::GlobalArgs};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the action-surface router. The admin client is shared; the
/// session-scoped client is built per request from the cookie.
pub fn router(globals: GlobalArgs) -> Result<Router> {
    let admin = AdminClient::new(&globals)?;

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/auth/sign-up", post(handlers::sign_up))
        .route("/v1/auth/otp", post(handlers::otp))
        .route("/v1/auth/sign-in", post(handlers::sign_in))
        .route("/v1/auth/verify", post(handlers::verify))
        .route("/v1/auth/me", get(handlers::me))
        .route("/v1/auth/sign-out", post(handlers::sign_out))
        .layer(Extension(admin))
        .layer(Extension(Arc::new(globals)))
        .layer(TraceLayer::new_for_http()))
}

pub async fn new(port: u16, globals: GlobalArgs) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on port {}", port);

    let app = router(globals)?;

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
