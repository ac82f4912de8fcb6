//! Persona chat with a generated species.
//!
//! The species descriptor is turned into a system prompt, the conversation
//! history is sent to Gemini on every turn, and replies carry `[..._TAG]`
//! markers naming the facts they reveal.

pub mod client;
pub mod prompt;
pub mod tags;

use serde::{Deserialize, Serialize};

pub use client::{ChatClient, ChatConfig, API_KEY_ENV};
pub use prompt::system_prompt;
pub use tags::{extract_tags, strip_tags};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("conversation history is empty")]
    EmptyHistory,
    #[error("species descriptor has no `{0}`; cannot build a persona")]
    MissingPersona(&'static str),
    #[error("could not reach the model: {0}")]
    Network(String),
    #[error("model request failed ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("reply blocked by safety filters; try rephrasing")]
    SafetyBlocked,
    #[error("prompt blocked by safety filters ({0})")]
    PromptBlocked(String),
    #[error("could not parse model response: {0}")]
    Parse(String),
    #[error("model returned an empty or unexpected response")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Anything that can turn a conversation history into the next model reply.
pub trait ChatBackend {
    fn generate(&self, history: &[Turn]) -> Result<String, ChatError>;
}

/// A running conversation, starting with the persona's system prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    history: Vec<Turn>,
}

impl Conversation {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            history: vec![Turn::new(Role::System, system_prompt)],
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Send `message` and return the raw reply, tags included.
    ///
    /// The user turn stays in the history even if the request fails, so a
    /// retry sees what was asked. The model turn is only added on success.
    pub fn ask<B: ChatBackend + ?Sized>(
        &mut self,
        backend: &B,
        message: &str,
    ) -> Result<String, ChatError> {
        self.history.push(Turn::new(Role::User, message));
        let reply = backend.generate(&self.history)?;
        self.history.push(Turn::new(Role::Model, reply.clone()));
        Ok(reply)
    }
}
