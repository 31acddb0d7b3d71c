use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{ApiError, ApiOptimizeRequest, ApiOptimizeResponse};
use post_optimizer::config::OptimizerConfig;
use post_optimizer::{optimize_posts_with, PlatformCatalog};

#[derive(Clone)]
pub struct AppState {
    config: Arc<OptimizerConfig>,
    catalog: Arc<PlatformCatalog>,
}

impl AppState {
    pub fn new(config: OptimizerConfig, catalog: PlatformCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}

pub async fn serve(args: crate::ServeArgs, config: OptimizerConfig) -> Result<(), String> {
    let catalog = config.catalog().map_err(|err| err.to_string())?;
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let app = router(AppState::new(config, catalog));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    info!(%addr, "listening");

    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/optimizer/optimize", post(optimize_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn optimize_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApiOptimizeRequest>, JsonRejection>,
) -> Result<Json<ApiOptimizeResponse>, ApiError> {
    let Json(request) = payload?;
    let (posts, options, context) = request.into_parts(&state.config)?;
    let optimized = optimize_posts_with(&state.catalog, &posts, &options)?;
    Ok(Json(ApiOptimizeResponse::from_result(optimized, &context)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(
            OptimizerConfig::default(),
            PlatformCatalog::default(),
        ))
    }

    async fn post_json(body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/optimizer/optimize")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn optimize_returns_items_and_rows() {
        let (status, body) = post_json(
            r#"{"posts":[{"post":"Check out our app","score":5}],"platform":"X","product_name":"App"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["optimized"]["platform"], "Twitter");
        assert_eq!(body["data"]["optimized"]["tone"], "Neutral");
        assert_eq!(body["data"]["rows"][0]["product_name"], "App");
        assert_eq!(body["data"]["optimized"]["summary"]["winners"][0], 0);
    }

    #[tokio::test]
    async fn empty_posts_is_a_bad_request() {
        let (status, body) = post_json(r#"{"posts":[]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "posts array is required in body");
    }

    #[tokio::test]
    async fn malformed_body_gets_the_json_error_shape() {
        let (status, body) = post_json("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|error| !error.is_empty()));

        let (status, body) = post_json(r#"{"posts":[{"post":"a"}],"platform":5}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }
}
