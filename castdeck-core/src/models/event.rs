use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    chat::ChatMessage, giveaway::Giveaway, id::SessionId, notice::Notice, poll::PollResults,
    product::Product, question::QAQuestion, snapshot::SessionSnapshot,
};

/// Events emitted to the dashboard and the viewer overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    MessagePosted {
        session_id: SessionId,
        message: ChatMessage,
    },

    /// Chat message rejected by the moderation list
    MessageBlocked {
        session_id: SessionId,
        author: String,
        matched_word: String,
        timestamp: DateTime<Utc>,
    },

    ProductToggled {
        session_id: SessionId,
        product: Product,
    },

    /// Poll created, voted on, opened or closed
    PollUpdated {
        session_id: SessionId,
        results: PollResults,
    },

    /// Questions in display order after any change
    QuestionListChanged {
        session_id: SessionId,
        questions: Vec<QAQuestion>,
    },

    GiveawayWinnerSelected {
        session_id: SessionId,
        giveaway: Giveaway,
        winner: String,
    },

    NoticeSent {
        session_id: SessionId,
        notice: Notice,
    },

    /// Final state for archival
    SessionEnded {
        session_id: SessionId,
        snapshot: Box<SessionSnapshot>,
    },
}

impl SessionEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessagePosted { .. } => "message_posted",
            Self::MessageBlocked { .. } => "message_blocked",
            Self::ProductToggled { .. } => "product_toggled",
            Self::PollUpdated { .. } => "poll_updated",
            Self::QuestionListChanged { .. } => "question_list_changed",
            Self::GiveawayWinnerSelected { .. } => "giveaway_winner_selected",
            Self::NoticeSent { .. } => "notice_sent",
            Self::SessionEnded { .. } => "session_ended",
        }
    }

    pub fn session_id(&self) -> &SessionId {
        match self {
            Self::MessagePosted { session_id, .. }
            | Self::MessageBlocked { session_id, .. }
            | Self::ProductToggled { session_id, .. }
            | Self::PollUpdated { session_id, .. }
            | Self::QuestionListChanged { session_id, .. }
            | Self::GiveawayWinnerSelected { session_id, .. }
            | Self::NoticeSent { session_id, .. }
            | Self::SessionEnded { session_id, .. } => session_id,
        }
    }
}
