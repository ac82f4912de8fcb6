//! Gemini `generateContent` client.
//!
//! Requests are blocking; the chat loop is interactive and waits on every
//! reply anyway. Response interpretation is split from transport so the
//! finish-reason handling can be exercised without a network.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ChatBackend, ChatError, Role, Turn};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Returned when the model stops at the token limit without any text.
pub const TRUNCATED_NOTICE: &str = "Response truncated (max tokens reached).";

/// Configuration for the Gemini endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of the API, without the `/v1beta` path.
    pub base_url: String,
    pub model: String,
    /// Never written back out with the rest of the config.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub max_output_tokens: u32,
    /// 0.0 is deterministic, higher is more varied.
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            api_key: None,
            max_output_tokens: 500,
            temperature: 1.0,
            top_k: 1,
            top_p: 1.0,
            timeout_secs: 60,
        }
    }
}

impl ChatConfig {
    /// Default config with the API key taken from `GEMINI_API_KEY`, if set.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize, Debug)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl<'a> GenerateRequest<'a> {
    /// A leading system turn becomes the system instruction; everything else
    /// is sent as conversation contents.
    fn new(history: &'a [Turn], config: &ChatConfig) -> Self {
        let (system, rest) = match history.split_first() {
            Some((first, rest)) if first.role == Role::System => (Some(first), rest),
            _ => (None, history),
        };
        Self {
            contents: rest
                .iter()
                .map(|turn| Content {
                    role: turn.role.as_str(),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            system_instruction: system.map(|turn| SystemInstruction {
                parts: vec![Part { text: &turn.text }],
            }),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl Candidate {
    fn text(&self) -> Option<String> {
        self.content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// Turn a successful response body into the reply text.
pub(crate) fn parse_reply(body: &str) -> Result<String, ChatError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))?;

    if let Some(candidate) = response.candidates.first() {
        match candidate.finish_reason.as_deref() {
            Some("SAFETY") => return Err(ChatError::SafetyBlocked),
            Some("MAX_TOKENS") => {
                tracing::warn!("reply cut short at the token limit");
                return Ok(candidate.text().unwrap_or_else(|| TRUNCATED_NOTICE.to_string()));
            }
            _ => {}
        }
        if let Some(text) = candidate.text() {
            return Ok(text);
        }
    }
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ChatError::PromptBlocked(reason));
    }
    Err(ChatError::EmptyResponse)
}

/// Turn a non-2xx response into an API error with whatever message the body carries.
pub(crate) fn parse_failure(status: u16, body: &str) -> ChatError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    let message = match detail {
        Some(ErrorDetail { message, details }) => {
            let mut text = message.unwrap_or_else(|| "No additional error message.".to_string());
            if let Some(details) = details {
                text.push(' ');
                text.push_str(&details.to_string());
            }
            text
        }
        None if body.trim().is_empty() => "No additional error message.".to_string(),
        None => body.trim().to_string(),
    };
    ChatError::Api { status, message }
}

/// Blocking Gemini client.
pub struct ChatClient {
    config: ChatConfig,
    client: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ChatBackend for ChatClient {
    fn generate(&self, history: &[Turn]) -> Result<String, ChatError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ChatError::MissingApiKey)?;
        if history.is_empty() {
            return Err(ChatError::EmptyHistory);
        }

        let request = GenerateRequest::new(history, &self.config);
        tracing::debug!(model = %self.config.model, turns = history.len(), "sending chat request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&request)
            .send()
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ChatError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(parse_failure(status.as_u16(), &body));
        }
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<Turn> {
        vec![
            Turn::new(Role::System, "You are Zanor."),
            Turn::new(Role::User, "Hello?"),
            Turn::new(Role::Model, "Greetings."),
            Turn::new(Role::User, "Where are you from?"),
        ]
    }

    #[test]
    fn test_request_shape() {
        let turns = history();
        let request = GenerateRequest::new(&turns, &ChatConfig::default());
        let json = serde_json::to_value(&request).expect("json");
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "You are Zanor.");
        assert_eq!(json["contents"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["generationConfig"]["topK"], 1);
        assert_eq!(json["safetySettings"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_NONE");
    }

    #[test]
    fn test_request_without_system_turn() {
        let turns = vec![Turn::new(Role::User, "Hi")];
        let json = serde_json::to_value(GenerateRequest::new(&turns, &ChatConfig::default())).expect("json");
        assert!(json.get("system_instruction").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn test_reply_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I am Zanor [INDIVIDUAL_NAME_TAG]."}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse_reply(body).expect("reply"), "I am Zanor [INDIVIDUAL_NAME_TAG].");
    }

    #[test]
    fn test_reply_finish_reasons() {
        let safety = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        assert!(matches!(parse_reply(safety), Err(ChatError::SafetyBlocked)));

        let cut = r#"{"candidates":[{"content":{"parts":[{"text":"We are"}]},"finishReason":"MAX_TOKENS"}]}"#;
        assert_eq!(parse_reply(cut).expect("partial"), "We are");

        let cut_empty = r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#;
        assert_eq!(parse_reply(cut_empty).expect("notice"), TRUNCATED_NOTICE);
    }

    #[test]
    fn test_prompt_block_and_empty() {
        let blocked = r#"{"promptFeedback":{"blockReason":"OTHER"}}"#;
        match parse_reply(blocked) {
            Err(ChatError::PromptBlocked(reason)) => assert_eq!(reason, "OTHER"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(parse_reply("{}"), Err(ChatError::EmptyResponse)));
        assert!(matches!(parse_reply("not json"), Err(ChatError::Parse(_))));
    }

    #[test]
    fn test_failure_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid."}}"#;
        match parse_failure(400, body) {
            ChatError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse_failure(503, "") {
            ChatError::Api { message, .. } => assert_eq!(message, "No additional error message."),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_and_empty_history() {
        let client = ChatClient::new(ChatConfig::default()).expect("client");
        assert!(matches!(client.generate(&history()), Err(ChatError::MissingApiKey)));

        let config = ChatConfig {
            api_key: Some("test-key".to_string()),
            ..ChatConfig::default()
        };
        let client = ChatClient::new(config).expect("client");
        assert!(matches!(client.generate(&[]), Err(ChatError::EmptyHistory)));
    }

    #[test]
    fn test_config_never_serializes_key() {
        let config = ChatConfig {
            api_key: Some("secret".to_string()),
            ..ChatConfig::default()
        };
        let json = serde_json::to_string(&config).expect("json");
        assert!(!json.contains("secret"));
        let back: ChatConfig = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.api_key, None);
        assert_eq!(back.model, config.model);
    }
}
