//! Bedrock knowledge base client.
//!
//! The handler only talks to the [`KnowledgeBase`] trait so the upstream call
//! can be swapped for a recording mock in tests.

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseRetrieveAndGenerateConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use aws_sdk_bedrockagentruntime::Client as BedrockAgentClient;
use serde::Deserialize;
use tracing::debug;

use crate::{Config, Error, Result};

/// A single retrieve-and-generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveRequest {
    /// Trimmed user question
    pub query: String,
    /// Knowledge base to search
    pub knowledge_base_id: String,
    /// Model that synthesizes the answer
    pub model_arn: String,
}

impl RetrieveRequest {
    pub fn new(query: impl Into<String>, config: &Config) -> Self {
        Self {
            query: query.into(),
            knowledge_base_id: config.knowledge_base_id.clone(),
            model_arn: config.model_arn.clone(),
        }
    }
}

/// Result of a retrieve-and-generate call, mirroring the service's
/// `output.text` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratedResponse {
    #[serde(default)]
    pub output: Option<GeneratedOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratedOutput {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeneratedResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            output: Some(GeneratedOutput {
                text: Some(text.into()),
            }),
        }
    }

    /// Generated text, if the service produced any.
    pub fn text(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|output| output.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Retrieve-and-generate capability backed by a knowledge base.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn retrieve_and_generate(&self, request: RetrieveRequest) -> Result<GeneratedResponse>;
}

/// [`KnowledgeBase`] backed by Bedrock Agent Runtime.
pub struct BedrockKnowledgeBase {
    client: BedrockAgentClient,
}

impl BedrockKnowledgeBase {
    /// Create a knowledge base client from an existing SDK client.
    pub fn new(client: BedrockAgentClient) -> Self {
        Self { client }
    }

    /// Create a knowledge base client from the default AWS configuration chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(BedrockAgentClient::new(&config))
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn retrieve_and_generate(&self, request: RetrieveRequest) -> Result<GeneratedResponse> {
        let input = RetrieveAndGenerateInput::builder()
            .text(request.query)
            .build()
            .map_err(|e| Error::Internal(format!("Invalid retrieve input: {}", e)))?;

        let knowledge_base = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(request.knowledge_base_id)
            .model_arn(request.model_arn)
            .build()
            .map_err(|e| Error::Internal(format!("Invalid knowledge base configuration: {}", e)))?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base)
            .build()
            .map_err(|e| Error::Internal(format!("Invalid retrieve configuration: {}", e)))?;

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                Error::Aws(format!(
                    "Failed to retrieve and generate: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(has_output = response.output().is_some(), "Knowledge base responded");

        Ok(GeneratedResponse {
            output: response.output().map(|output| GeneratedOutput {
                text: Some(output.text().to_string()),
            }),
        })
    }
}
