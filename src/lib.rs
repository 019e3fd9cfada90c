pub mod api;
pub mod config;
pub mod ocr;
pub mod pipeline;
pub mod text;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{ApiContext, ServerError};
use crate::config::{AppConfig, LLM_TIMEOUT_SECS};
use crate::pipeline::persona::{ClaudeClient, PersonaPrompts};

/// Load configuration and persona prompts, then serve until shutdown.
pub async fn run() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let prompts = PersonaPrompts::load_from_dir(&config.prompts_dir);
    let llm = ClaudeClient::new(
        &config.claude_base_url,
        config.claude_api_key.clone(),
        &config.claude_model,
        LLM_TIMEOUT_SECS,
    )?;
    tracing::info!(model = llm.model(), "Claude client ready");

    let ctx = ApiContext::new(Arc::new(llm), prompts, &config);
    api::serve(&config, ctx).await
}
