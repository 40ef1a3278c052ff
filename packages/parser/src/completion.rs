//! Text-completion capability
//!
//! The parser only needs "messages in, text out". Providers implement
//! [`CompletionProvider`]; the text they return is never trusted to be JSON.

use crate::CompletionResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text, unparsed
    pub content: String,
    /// Model that generated the response
    pub model: String,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logs (e.g. "openai")
    fn name(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> CompletionResult<CompletionResponse>;
}
