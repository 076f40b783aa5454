use std::net::SocketAddr;

use axum::Router;
use log::error;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port for the lifetime of the runtime,
/// used to stand in for upstream hosts in tests
pub async fn serve_stub(router: Router) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            error!("Stub server on {} stopped: {}", addr, err);
        }
    });
    Ok(addr)
}
