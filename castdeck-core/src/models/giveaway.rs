use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::GiveawayId;

/// Prize draw. Once `winner` is set the giveaway is closed for good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Giveaway {
    pub id: GiveawayId,
    pub title: String,
    pub prize: String,
    pub participants: Vec<String>,
    pub participant_count: usize,
    pub active: bool,
    pub winner: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Giveaway {
    pub fn new(title: String, prize: String) -> Self {
        Self {
            id: GiveawayId::new(),
            title,
            prize,
            participants: Vec::new(),
            participant_count: 0,
            active: true,
            winner: None,
            created_at: Utc::now(),
        }
    }

    /// Open for entries and draws
    pub fn is_open(&self) -> bool {
        self.active && self.winner.is_none()
    }
}
