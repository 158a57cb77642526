pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::info;

use self::{config::ServerConfig, error::ApiError, routes::AppState, upstream::CatalogClient};

/// Builds the proxy router: the two API routes, a JSON 404 for everything
/// else under no static file, and static asset serving for the UI bundle.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let static_files =
        ServeDir::new(&config.static_dir).not_found_service(routes::not_found.into_service());

    Router::new()
        .route("/api/search", get(routes::search))
        .route("/api/health", get(routes::health))
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Uncaught handler failures become the generic server-error body instead
/// of a dropped connection.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(message).into_response()
}

pub async fn serve(config: ServerConfig) -> color_eyre::Result<()> {
    let catalog = Arc::new(CatalogClient::new(config.upstream_url.clone()));
    let app = router(AppState { catalog }, &config);

    let addr: SocketAddr = (config.host.parse::<std::net::IpAddr>()?, config.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server is running on http://{addr}");
    info!("Search API available at: http://{addr}/api/search?q=your-search-term");
    info!("Health check available at: http://{addr}/api/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Exit promptly on interrupt or terminate; there is no in-flight state to
/// drain.
async fn shutdown_signal() {
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Received SIGINT. Shutting down"),
        _ = terminate => info!("Received SIGTERM. Shutting down"),
    }
}
