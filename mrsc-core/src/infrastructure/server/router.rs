use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::application::{ChatRelay, MetricsFeed};
use crate::constants::CORS_ALLOWED_HEADERS;
use crate::infrastructure::model::ModelClient;
use axum::Router;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the relay router.
///
/// Every `OPTIONS` request is answered by the CORS layer with an empty 200 and
/// never reaches a handler. Every other response, errors included, carries
/// `Access-Control-Allow-Origin: *` and the allowed request headers.
pub fn build_router<C>(relay: Arc<ChatRelay<C>>, metrics: Arc<MetricsFeed>) -> Router
where
    C: ModelClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);
    let allow_headers = SetResponseHeaderLayer::if_not_present(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOWED_HEADERS),
    );

    let state = Arc::new(ServerState::new(relay, metrics));
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/", post(routes::chat::chat_handler::<C>))
        .route("/health", get(routes::health::health_handler))
        .route("/metrics", get(routes::metrics::metrics_handler::<C>))
        .layer(cors)
        .layer(allow_headers)
        .with_state(state)
}

pub(super) async fn serve<C>(
    relay: Arc<ChatRelay<C>>,
    metrics: Arc<MetricsFeed>,
    addr: SocketAddr,
) -> Result<(), ServerError>
where
    C: ModelClient + 'static,
{
    info!(%addr, "Binding REST server");
    let app = build_router(relay, metrics);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => warn!(%err, "Failed to listen for shutdown signal"),
    }
}
