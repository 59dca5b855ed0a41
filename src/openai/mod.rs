//! Chat-completion provider abstraction.
//!
//! The rest of the crate talks to a [`CompletionProvider`]; the real
//! implementation calls an OpenAI-compatible endpoint, tests use
//! [`fake::FakeProvider`].

mod process;

#[cfg(test)]
pub mod fake;

pub use process::OpenAiProvider;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A prompt ready to send: the message sequence plus sampling limits
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Something that turns a prompt into a completion
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Send the request and return the raw completion text
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Model name used for logging
    fn model_name(&self) -> &str;
}
