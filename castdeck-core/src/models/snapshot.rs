use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    chat::ChatMessage, giveaway::Giveaway, notice::Notice, poll::PollResults, product::Product,
    question::QAQuestion, session::PanelSelection, session::Session, viewer::Viewer,
};

/// Immutable copy of a session's full state, handed to renderers and archival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: Session,
    pub panels: PanelSelection,
    pub messages: Vec<ChatMessage>,
    pub banned_words: Vec<String>,
    pub viewers: Vec<Viewer>,
    pub products: Vec<Product>,
    pub polls: Vec<PollResults>,
    /// Display order: pinned first
    pub questions: Vec<QAQuestion>,
    pub giveaways: Vec<Giveaway>,
    /// Most recent first
    pub notices: Vec<Notice>,
    pub taken_at: DateTime<Utc>,
}
