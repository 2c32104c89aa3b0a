use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Frustrated,
}

/// One entry in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Option<Sentiment>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::generate(),
            role: ChatRole::User,
            content: content.into(),
            timestamp: at,
            sentiment: None,
        }
    }

    #[must_use]
    pub fn assistant(
        content: impl Into<String>,
        sentiment: Option<Sentiment>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: at,
            sentiment,
        }
    }
}
