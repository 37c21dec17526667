use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::QuestionId;

/// Audience question submitted during the broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAQuestion {
    pub id: QuestionId,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub answered: bool,
    pub pinned: bool,
}

impl QAQuestion {
    pub fn new(author: String, text: String) -> Self {
        Self {
            id: QuestionId::new(),
            text,
            author,
            timestamp: Utc::now(),
            answered: false,
            pinned: false,
        }
    }
}
