//! Chat Lambda - Handles the widget's /chat endpoint.
//!
//! Forwards the user's question to a Bedrock knowledge base and relays the
//! generated answer as an API Gateway proxy response.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{BedrockKnowledgeBase, Config, HttpResponse};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    knowledge_base: BedrockKnowledgeBase,
    config: Config,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let knowledge_base = BedrockKnowledgeBase::from_env().await;

        info!(
            knowledge_base_id = %config.knowledge_base_id,
            model_arn = %config.model_arn,
            "Chat handler initialized"
        );

        Ok(Self {
            knowledge_base,
            config,
        })
    }
}

async fn handler(state: Arc<AppState>, event: LambdaEvent<Value>) -> Result<HttpResponse, Error> {
    Ok(shared::handle(&state.knowledge_base, &state.config, &event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
