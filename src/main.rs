use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use counselor_chat::adapters::generation::SelectedBackend;
use counselor_chat::adapters::http::{app_router, CounselingHandlers};
use counselor_chat::adapters::safety::{GeminiReviewer, GeminiReviewerConfig, PassThroughReviewer};
use counselor_chat::adapters::storage::{FileDialogueLog, InMemorySessionStore};
use counselor_chat::application::{
    ChatTurnHandler, CounselorTurnGenerator, InitSessionHandler, ReadinessGate, SessionSweeper,
};
use counselor_chat::config::{AppConfig, LogFormat, SafetyConfig, ServerConfig};
use counselor_chat::domain::counseling::{KeywordTermination, TerminationPolicy};
use counselor_chat::ports::{DialogueLog, GenerationError, SafetyReviewer, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(
        config.session.ttl(),
        config.session.max_sessions,
    ));
    let log: Arc<dyn DialogueLog> = Arc::new(FileDialogueLog::new(&config.session.dialogue_dir));
    let reviewer = build_reviewer(&config.safety)?;
    let termination: Arc<dyn TerminationPolicy> = Arc::new(KeywordTermination::new(
        config.session.counseling_token.as_str(),
        config.session.end_token.as_str(),
    ));

    let generation = config.generation.clone();
    let closing_line = config.session.closing_line.clone();
    let generator = ReadinessGate::spawn("counselor", async move {
        let backend = SelectedBackend::from_config(&generation).await?;
        tracing::info!(
            hosted = backend.is_hosted(),
            model = %generation.model_identifier,
            "Generation backend selected"
        );
        Ok::<_, GenerationError>(
            CounselorTurnGenerator::new(Arc::new(backend), reviewer, termination, closing_line)
                .with_history_window(generation.history_window),
        )
    });

    let sweeper = SessionSweeper::new(
        store.clone(),
        log.clone(),
        config.session.expiry_policy,
        config.session.closing_line.as_str(),
    )
    .spawn(config.session.sweep_interval());

    let handlers = CounselingHandlers::new(
        Arc::new(InitSessionHandler::new(store.clone(), config.session.opening_line.as_str())),
        Arc::new(ChatTurnHandler::new(store, log, generator.clone())),
        generator,
        config.session.default_client_message.as_str(),
    );
    let app = app_router(handlers, &config.server.cors_origins_list());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Counselor chat listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Counselor chat stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(server.log_level.as_str()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match server.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

fn build_reviewer(safety: &SafetyConfig) -> Result<Arc<dyn SafetyReviewer>, Box<dyn Error>> {
    if !safety.enabled {
        tracing::warn!("Safety review disabled; counselor drafts are delivered unreviewed");
        return Ok(Arc::new(PassThroughReviewer));
    }

    let api_key = safety
        .safety_api_key
        .clone()
        .ok_or("safety review is enabled but no API key is configured")?;
    let reviewer = GeminiReviewer::new(
        GeminiReviewerConfig::new(api_key)
            .with_model(safety.safety_model_identifier.as_str())
            .with_base_url(safety.base_url.as_str())
            .with_timeout(safety.timeout()),
    )?;
    Ok(Arc::new(reviewer))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
