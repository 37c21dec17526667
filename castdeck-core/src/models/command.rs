use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    chat::ChatMessage,
    giveaway::Giveaway,
    id::{GiveawayId, OptionId, PollId, ProductId, QuestionId, ViewerId},
    notice::Notice,
    poll::PollResults,
    product::Product,
    question::QAQuestion,
    session::{BroadcastType, Panel, Session, SessionConfig},
    snapshot::SessionSnapshot,
    viewer::Viewer,
};

/// Operator command accepted by a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CreateSession {
        broadcast_type: BroadcastType,
        #[serde(default)]
        config: SessionConfig,
    },
    EndSession,

    PostChatMessage {
        author: String,
        text: String,
        #[serde(default)]
        is_host: bool,
    },
    AddBannedWord {
        word: String,
    },
    RemoveBannedWord {
        word: String,
    },

    JoinViewer {
        viewer_id: ViewerId,
        username: String,
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
    },

    AddProduct {
        product: Product,
    },
    AttachFromCatalog {
        product_id: ProductId,
    },
    ToggleProductActive {
        product_id: ProductId,
    },
    RemoveProduct {
        product_id: ProductId,
    },

    CreatePoll {
        question: String,
        options: Vec<String>,
    },
    Vote {
        poll_id: PollId,
        option_id: OptionId,
    },
    SetPollActive {
        poll_id: PollId,
        active: bool,
    },
    DeletePoll {
        poll_id: PollId,
    },

    SubmitQuestion {
        /// Blank or missing is recorded as anonymous
        #[serde(default)]
        author: String,
        text: String,
    },
    ToggleAnswered {
        question_id: QuestionId,
    },
    TogglePinned {
        question_id: QuestionId,
    },
    DeleteQuestion {
        question_id: QuestionId,
    },

    CreateGiveaway {
        title: String,
        prize: String,
    },
    EnterGiveaway {
        giveaway_id: GiveawayId,
        participant: String,
    },
    SelectWinner {
        giveaway_id: GiveawayId,
    },
    DeleteGiveaway {
        giveaway_id: GiveawayId,
    },

    SendNotice {
        message: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateSession { .. } => "create_session",
            Self::EndSession => "end_session",
            Self::PostChatMessage { .. } => "post_chat_message",
            Self::AddBannedWord { .. } => "add_banned_word",
            Self::RemoveBannedWord { .. } => "remove_banned_word",
            Self::JoinViewer { .. } => "join_viewer",
            Self::AddProduct { .. } => "add_product",
            Self::AttachFromCatalog { .. } => "attach_from_catalog",
            Self::ToggleProductActive { .. } => "toggle_product_active",
            Self::RemoveProduct { .. } => "remove_product",
            Self::CreatePoll { .. } => "create_poll",
            Self::Vote { .. } => "vote",
            Self::SetPollActive { .. } => "set_poll_active",
            Self::DeletePoll { .. } => "delete_poll",
            Self::SubmitQuestion { .. } => "submit_question",
            Self::ToggleAnswered { .. } => "toggle_answered",
            Self::TogglePinned { .. } => "toggle_pinned",
            Self::DeleteQuestion { .. } => "delete_question",
            Self::CreateGiveaway { .. } => "create_giveaway",
            Self::EnterGiveaway { .. } => "enter_giveaway",
            Self::SelectWinner { .. } => "select_winner",
            Self::DeleteGiveaway { .. } => "delete_giveaway",
            Self::SendNotice { .. } => "send_notice",
        }
    }

    /// Console panel the command belongs to; chat, roster and lifecycle have none
    pub fn panel(&self) -> Option<Panel> {
        match self {
            Self::AddProduct { .. }
            | Self::AttachFromCatalog { .. }
            | Self::ToggleProductActive { .. }
            | Self::RemoveProduct { .. } => Some(Panel::Merchandising),
            Self::CreatePoll { .. }
            | Self::Vote { .. }
            | Self::SetPollActive { .. }
            | Self::DeletePoll { .. } => Some(Panel::Polls),
            Self::SubmitQuestion { .. }
            | Self::ToggleAnswered { .. }
            | Self::TogglePinned { .. }
            | Self::DeleteQuestion { .. } => Some(Panel::QuestionsAndAnswers),
            Self::CreateGiveaway { .. }
            | Self::EnterGiveaway { .. }
            | Self::SelectWinner { .. }
            | Self::DeleteGiveaway { .. } => Some(Panel::Giveaways),
            Self::SendNotice { .. } => Some(Panel::Notices),
            Self::CreateSession { .. }
            | Self::EndSession
            | Self::PostChatMessage { .. }
            | Self::AddBannedWord { .. }
            | Self::RemoveBannedWord { .. }
            | Self::JoinViewer { .. } => None,
        }
    }
}

/// State changed by a successful command, for re-rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateDelta {
    SessionCreated { session: Session },
    SessionEnded { snapshot: Box<SessionSnapshot> },
    MessagePosted { message: ChatMessage },
    BannedWordsChanged { words: Vec<String> },
    ViewerJoined { viewer: Viewer },
    ProductUpdated { product: Product },
    ProductRemoved { product: Product },
    PollUpdated { results: PollResults },
    PollDeleted { poll_id: PollId },
    QuestionsChanged { questions: Vec<QAQuestion> },
    GiveawayUpdated { giveaway: Giveaway },
    GiveawayDeleted { giveaway_id: GiveawayId },
    NoticeSent { notice: Notice },
}
