use serde::{Deserialize, Serialize};

/// Progress notifications emitted while a document or batch is processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuditEvent {
    Starting,
    Analyzing { document: String },
    Parsed { document: String, rows: usize },
    Completed { document: String },
    Failed { document: String, reason: String },
}

/// Extracted text for one document, produced by the external text source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceDocument {
            name: name.into(),
            text: text.into(),
        }
    }
}

// Wire format for the OpenAI-compatible chat completions endpoint.

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
