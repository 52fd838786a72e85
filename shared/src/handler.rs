//! Chat query handling.
//!
//! Turns an API Gateway proxy event into a single knowledge base call and
//! always answers with a proxy-shaped JSON response.

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::http::HttpResponse;
use crate::knowledge::{KnowledgeBase, RetrieveRequest};
use crate::models::AnswerBody;
use crate::{Config, Error, Result};

/// Answer returned when the knowledge base produced no text.
pub const FALLBACK_ANSWER: &str = "No relevant information found.";

/// Validation message for a blank or absent query.
pub const QUERY_MISSING: &str = "Query missing";

/// Handle one inbound event. Never fails: every error becomes a response.
pub async fn handle<K>(knowledge_base: &K, config: &Config, event: &Value) -> HttpResponse
where
    K: KnowledgeBase + ?Sized,
{
    info!(event = %event, "Received event");

    match answer(knowledge_base, config, event)
        .await
        .and_then(|answer| HttpResponse::json(200, &AnswerBody { answer }))
    {
        Ok(response) => response,
        Err(e) => {
            if e.status_code() >= 500 {
                error!(error = %e, "Failed to answer query");
            }
            HttpResponse::from_error(&e)
        }
    }
}

/// Resolve the answer text for an event.
pub async fn answer<K>(knowledge_base: &K, config: &Config, event: &Value) -> Result<String>
where
    K: KnowledgeBase + ?Sized,
{
    let body = normalize_body(event)?;
    let query = extract_query(&body)?;

    let response = knowledge_base
        .retrieve_and_generate(RetrieveRequest::new(query, config))
        .await?;

    Ok(response.text().unwrap_or(FALLBACK_ANSWER).to_string())
}

/// Normalize the event `body` into a JSON object.
///
/// A non-blank string must be valid JSON; anything that is not an object
/// ends up as an empty map.
pub fn normalize_body(event: &Value) -> Result<Map<String, Value>> {
    let body: Value = match event.get("body") {
        Some(Value::String(raw)) if !raw.trim().is_empty() => serde_json::from_str(raw)?,
        Some(Value::Object(map)) => return Ok(map.clone()),
        _ => return Ok(Map::new()),
    };

    match body {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Pull the trimmed `query` out of a normalized body.
pub fn extract_query(body: &Map<String, Value>) -> Result<String> {
    let raw = match body.get("query") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(query)) => query.clone(),
        Some(other) => other.to_string(),
    };

    let query = raw.trim();
    if query.is_empty() {
        return Err(Error::Validation(QUERY_MISSING.to_string()));
    }

    Ok(query.to_string())
}
