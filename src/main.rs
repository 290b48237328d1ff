use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use emotion_support::adapters::ai::{LlmAgentExecutor, MockAgentExecutor, OpenAIConfig, OpenAIProvider};
use emotion_support::adapters::http::{support_router, SupportAppState};
use emotion_support::adapters::postgres::PostgresSupportRepository;
use emotion_support::adapters::retrieval::{KeywordRetriever, TextChunker};
use emotion_support::adapters::storage::InMemorySupportRepository;
use emotion_support::application::SessionRegistry;
use emotion_support::config::{AiConfig, AiProvider, AppConfig, DatabaseConfig, RetrievalConfig};
use emotion_support::domain::foundation::Timestamp;
use emotion_support::domain::planning::Locale;
use emotion_support::ports::{AgentExecutor, Retriever, SupportRepository};
use secrecy::ExposeSecret;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const IDLE_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let agent = build_agent(&config.ai, config.support.locale)?;
    let repository = build_repository(config.database.as_ref()).await?;
    let retriever = config.retrieval.as_ref().and_then(build_retriever);

    let state = SupportAppState::assemble(&config.support, agent, retriever, Some(repository));
    if let Some(registry) = state.registry() {
        spawn_idle_sweep(registry);
    }
    let app = support_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        locale = config.support.locale.code(),
        "Emotion support API listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_idle_sweep(registry: Arc<SessionRegistry>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(IDLE_SWEEP_SECS));
        loop {
            ticker.tick().await;
            registry.evict_idle(Timestamp::now());
        }
    });
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

fn build_agent(ai: &AiConfig, locale: Locale) -> Result<Arc<dyn AgentExecutor>, BoxError> {
    match ai.provider {
        AiProvider::Mock => {
            tracing::warn!("Using mock agent; replies echo the user");
            Ok(Arc::new(MockAgentExecutor::new()))
        }
        AiProvider::OpenAI => {
            let api_key = ai
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().clone())
                .unwrap_or_default();
            let provider = OpenAIProvider::new(
                OpenAIConfig::new(api_key)
                    .with_model(ai.model.clone())
                    .with_base_url(ai.base_url.clone())
                    .with_timeout(ai.timeout())
                    .with_max_retries(ai.max_retries),
            )?;
            tracing::info!(model = %ai.model, "OpenAI agent configured");
            Ok(Arc::new(
                LlmAgentExecutor::new(Arc::new(provider), locale)
                    .with_temperature(ai.temperature)
                    .with_max_tokens(ai.max_tokens),
            ))
        }
    }
}

async fn build_repository(
    database: Option<&DatabaseConfig>,
) -> Result<Arc<dyn SupportRepository>, BoxError> {
    let Some(database) = database else {
        tracing::warn!("No database configured; support history is kept in memory only");
        return Ok(Arc::new(InMemorySupportRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;
    let repository = PostgresSupportRepository::new(pool);
    if database.ensure_schema {
        repository.ensure_schema().await?;
    }
    tracing::info!("PostgreSQL repository connected");
    Ok(Arc::new(repository))
}

fn build_retriever(retrieval: &RetrievalConfig) -> Option<Arc<dyn Retriever>> {
    let chunker = TextChunker::new(retrieval.chunk_size, retrieval.chunk_overlap);
    match KeywordRetriever::from_directory(&retrieval.data_directory, &chunker, retrieval.top_k) {
        Ok(retriever) if retriever.is_empty() => {
            tracing::warn!(
                directory = %retrieval.data_directory.display(),
                "No reference documents found; retrieval disabled"
            );
            None
        }
        Ok(retriever) => {
            tracing::info!(chunks = retriever.len(), "Reference documents indexed");
            Some(Arc::new(retriever))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load reference documents; retrieval disabled");
            None
        }
    }
}
