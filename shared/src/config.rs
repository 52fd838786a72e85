//! Configuration management for Lambda functions.

use std::env;

use crate::{Error, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bedrock knowledge base searched for every query
    pub knowledge_base_id: String,
    /// ARN of the foundation model that writes the answer
    pub model_arn: String,
}

impl Config {
    /// Build a configuration from explicit values.
    pub fn new(knowledge_base_id: impl Into<String>, model_arn: impl Into<String>) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.into(),
            model_arn: model_arn.into(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            knowledge_base_id: required("KNOWLEDGE_BASE_ID")?,
            model_arn: required("MODEL_ARN")?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(Error::Config(format!("{} not set", name))),
    }
}
