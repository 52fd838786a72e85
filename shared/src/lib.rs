//! Shared library for the knowledge chat Lambda functions.
//!
//! This crate provides the chat query handler, the Bedrock knowledge base
//! client, and the response types used by every function.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod knowledge;
pub mod models;
pub mod probe;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::{handle, FALLBACK_ANSWER};
pub use http::HttpResponse;
pub use knowledge::{BedrockKnowledgeBase, GeneratedResponse, KnowledgeBase, RetrieveRequest};
pub use models::{AnswerBody, ErrorBody, ProbeBody};
pub use probe::{caller_identity, probe_response, CallerIdentity};
