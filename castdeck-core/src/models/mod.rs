pub mod chat;
pub mod command;
pub mod event;
pub mod giveaway;
pub mod id;
pub mod notice;
pub mod poll;
pub mod product;
pub mod question;
pub mod session;
pub mod snapshot;
pub mod viewer;

pub use chat::ChatMessage;
pub use command::{Command, StateDelta};
pub use event::SessionEvent;
pub use giveaway::Giveaway;
pub use id::{
    generate_id, GiveawayId, MessageId, NoticeId, OptionId, PollId, ProductId, QuestionId,
    SessionId, ViewerId,
};
pub use notice::Notice;
pub use poll::{percentage_of, OptionResult, Poll, PollOption, PollResults};
pub use product::Product;
pub use question::QAQuestion;
pub use session::{BroadcastType, Panel, PanelSelection, Session, SessionConfig, SessionStatus};
pub use snapshot::SessionSnapshot;
pub use viewer::Viewer;
