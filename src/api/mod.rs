//! HTTP API handlers and routes.
//!
//! The REST layer for docchat, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `POST /api/documents` - Upload documents (multipart) and (re)build the session
//! - `POST /api/chat` - Ask a question against the ingested documents
//! - `GET /api/history` - Current conversation history
//! - `GET /api/health` - Health check endpoint
//! - `GET /api/openapi.json` - OpenAPI document for the surface above
//!
//! There is no authentication: the server fronts a single local session, the
//! way the original desktop-style app did.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// Aggregated OpenAPI document, served at `GET /api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "docchat", description = "Conversational document Q&A"),
    paths(
        handlers::documents::upload,
        handlers::chat::chat,
        handlers::chat::history,
        handlers::health::health,
    ),
    components(schemas(
        crate::types::ChatRequest,
        crate::types::ChatResponse,
        crate::types::Source,
        crate::types::Message,
        crate::types::MessageRole,
        crate::types::IngestResponse,
        crate::types::HistoryResponse,
        crate::types::HealthResponse,
    )),
    tags(
        (name = "documents", description = "Document upload and ingestion"),
        (name = "chat", description = "Question answering over the ingested documents"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
