use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::MessageId;

/// A posted chat message; immutable once in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: String,
    pub text: String,
    pub is_host: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author: String, text: String, is_host: bool) -> Self {
        Self {
            id: MessageId::new(),
            author,
            text,
            is_host,
            timestamp: Utc::now(),
        }
    }
}
