use crate::AppState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use utoipa::OpenApi as _;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/documents", post(crate::api::handlers::documents::upload))
        .route("/chat", post(crate::api::handlers::chat::chat))
        .route("/history", get(crate::api::handlers::chat::history))
        .route("/health", get(crate::api::handlers::health::health))
        .route("/openapi.json", get(openapi))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(super::ApiDoc::openapi())
}
