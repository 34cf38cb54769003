use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("No extractable text: document yielded {got} characters, minimum is {min}")]
    NoExtractableText { got: usize, min: usize },

    #[error("Completion service unavailable: {0}")]
    CompletionUnavailable(String),

    #[error("Completion contained no usable data rows")]
    EmptyExtraction,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
