use crate::error::{ReportError, Result};
use crate::prompts::SYSTEM_INSTRUCTION;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "sonar-pro";
pub const MAX_TOKENS: u32 = 1200;
pub const TEMPERATURE: f64 = 0.2;
pub const TOP_P: f64 = 0.9;
pub const TOP_K: u32 = 0;
pub const PRESENCE_PENALTY: f64 = 0.0;
pub const FREQUENCY_PENALTY: f64 = 1.0;

/// Markup token joining citations for rich-text rendering.
pub const MARKUP_LINE_BREAK: &str = "<br>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFilter {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Body of a chat-completion call. Everything except the user prompt is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub search_domain_filter: Option<Vec<String>>,
    pub return_images: bool,
    pub return_related_questions: bool,
    pub search_recency_filter: RecencyFilter,
    pub top_k: u32,
    pub stream: bool,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub response_format: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            search_domain_filter: None,
            return_images: false,
            return_related_questions: false,
            search_recency_filter: RecencyFilter::Year,
            top_k: TOP_K,
            stream: false,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
            response_format: None,
        }
    }
}

// Wire schema for the subset of the response we consume. Optional fields let
// shape errors be reported with a specific message instead of a serde one.

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Parsed answer text and its ordered citation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    text: String,
    citations: Vec<String>,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, citations: Vec<String>) -> Self {
        Self {
            text: text.into(),
            citations,
        }
    }

    /// Validates a raw response body against the expected schema.
    ///
    /// A missing or `null` `citations` field is an error; an empty list is
    /// accepted.
    pub fn from_json(body: &str) -> Result<Self> {
        let response: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| ReportError::Parse(format!("Response is not valid JSON: {}", e)))?;

        let text = response
            .choices
            .ok_or_else(|| ReportError::Parse("Response missing 'choices'".to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::Parse("Empty choices list".to_string()))?
            .message
            .ok_or_else(|| ReportError::Parse("First choice has no message".to_string()))?
            .content
            .ok_or_else(|| ReportError::Parse("Message has no content".to_string()))?;

        let citations = response
            .citations
            .ok_or_else(|| ReportError::Parse("Response missing 'citations'".to_string()))?;

        Ok(Self { text, citations })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    /// One `[n]: citation` line per source, numbered from 1.
    pub fn citations_plain(&self) -> String {
        self.numbered_citations().join("\n")
    }

    pub fn citations_markup(&self) -> String {
        self.numbered_citations().join(MARKUP_LINE_BREAK)
    }

    fn numbered_citations(&self) -> Vec<String> {
        self.citations
            .iter()
            .enumerate()
            .map(|(i, citation)| format!("[{}]: {}", i + 1, citation))
            .collect()
    }
}
