use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Extension;
use axum::routing::any;
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::images::{download_image, search_images};
use crate::api::Context;

/// Both endpoints accept any method, GET with a query string or POST with
/// a JSON body being the usual ones
pub fn router(ctx: Arc<Context>) -> Router {
    Router::new()
        .route("/download-image", any(download_image))
        .route("/search-images", any(search_images))
        .layer(CorsLayer::permissive())
        .layer(Extension(ctx))
}

pub async fn run_server(ctx: Arc<Context>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, router(ctx)).await
}
