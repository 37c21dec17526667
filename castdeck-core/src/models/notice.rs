use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::NoticeId;

/// Announcement pushed to the viewer overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: String) -> Self {
        Self {
            id: NoticeId::new(),
            message,
            sent_at: Utc::now(),
        }
    }
}
