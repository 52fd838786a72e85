//! Identity Probe Lambda - Confirms connectivity and execution identity.
//!
//! Logs the STS caller identity once at cold start, then echoes each
//! request body so API Gateway wiring can be checked end to end.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{caller_identity, probe_response, HttpResponse};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(event: LambdaEvent<Value>) -> Result<HttpResponse, Error> {
    info!(event = %event.payload, "Received event");
    Ok(probe_response(&event.payload)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let identity = caller_identity(&aws_sdk_sts::Client::new(&config)).await?;
    info!(
        account = identity.account.as_deref().unwrap_or_default(),
        arn = identity.arn.as_deref().unwrap_or_default(),
        user_id = identity.user_id.as_deref().unwrap_or_default(),
        "Caller identity"
    );

    run(service_fn(handler)).await
}
