//! Model Client Contract
//!
//! Role-tagged conversation turns, the provider client trait, and the
//! classified failure modes that drive the retry policy.

use thiserror::Error;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

impl TurnRole {
    /// Wire name used by OpenAI-compatible APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One turn of a conversation sent to the model
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Classified failure from the model provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Provider rejected our credentials - retrying cannot help
    #[error("Model provider rejected credentials")]
    Auth,

    /// Provider throttled the request - worth retrying after a delay
    #[error("Model provider rate limited the request")]
    RateLimited,

    /// Account quota or billing exhausted - retrying cannot help
    #[error("Model provider quota exceeded")]
    QuotaExceeded,

    /// Anything else (network fault, 5xx, malformed response)
    #[error("Model provider error: {0}")]
    Other(String),
}

impl ModelError {
    /// Whether the retry policy may try again for this class
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Auth | ModelError::QuotaExceeded => false,
            ModelError::RateLimited | ModelError::Other(_) => true,
        }
    }
}

/// Client for the hosted language model
#[trait_variant::make(ModelClient: Send)]
pub trait LocalModelClient {
    /// Send role-tagged turns, receive the generated text
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ModelError>;
}
