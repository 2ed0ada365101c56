//! Server lifecycle — bind, serve, graceful shutdown.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::api::router::app_router;
use crate::api::types::ApiContext;

/// Bind the configured port on all interfaces and serve until ctrl-c.
pub async fn run(ctx: ApiContext) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.config.port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, ctx).await
}

/// Serve on an already-bound listener.
///
/// Split out from [`run`] so tests can bind an ephemeral port.
pub async fn serve(listener: TcpListener, ctx: ApiContext) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "HTTP server listening");

    let app = app_router(ctx);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Cannot listen for shutdown signal: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_ctx(dir: &std::path::Path) -> ApiContext {
        ApiContext::new(AppConfig {
            port: 0,
            api_key: None,
            data_dir: dir.join("data"),
            frontend_dir: dir.join("frontend"),
            interview_prompt: None,
        })
    }

    #[tokio::test]
    async fn serves_requests_over_tcp() {
        let dir = tempfile::tempdir().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(serve(listener, test_ctx(dir.path())));

        let response = reqwest::get(format!("http://{addr}/ask")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = response.json().await.unwrap();
        assert!(json["question"].is_string());

        server.abort();
    }

    #[tokio::test]
    async fn unknown_route_is_404_over_tcp() {
        let dir = tempfile::tempdir().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(serve(listener, test_ctx(dir.path())));

        let response = reqwest::get(format!("http://{addr}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        server.abort();
    }
}
