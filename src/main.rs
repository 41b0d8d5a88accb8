use docchat::rag::chunker::TextChunker;
use docchat::{AppState, Config, ConversationEngine, build_router};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    config.validate()?;

    let timeout = config.provider_timeout();
    let embedder = config.embedding_provider()?.create_client(timeout);
    let llm = config.chat_provider()?.create_client(timeout);

    info!(
        provider = %config.llm.provider,
        chat_model = llm.model_name(),
        embedding_space = embedder.space_id(),
        "Providers configured"
    );

    let chunker = TextChunker::new(
        config.rag.chunk_size,
        config.rag.chunk_overlap,
        config.rag.chunk_separator.clone(),
    )?;
    let engine = ConversationEngine::new(
        chunker,
        Arc::from(embedder),
        Arc::from(llm),
        config.rag.top_k,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        engine: Arc::new(engine),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "docchat server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("docchat=info,tower_http=info"));

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
