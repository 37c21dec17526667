use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ViewerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: ViewerId,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

impl Viewer {
    pub const fn new(id: ViewerId, username: String, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            joined_at,
        }
    }
}
