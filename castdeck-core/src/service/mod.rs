pub mod actor;
pub mod banned_words;
pub mod chat;
pub mod engagement;
pub mod events;
pub mod giveaway;
pub mod merchandising;
pub mod notice;
pub mod poll;
pub mod qa;
pub mod registry;
pub mod roster;
pub mod session;

pub use actor::SessionHandle;
pub use banned_words::BannedWordFilter;
pub use chat::ChatModerator;
pub use engagement::EngagementHub;
pub use events::{BroadcastEventSink, EventSink, NoopEventSink};
pub use giveaway::{FixedPicker, GiveawayManager, RandomPicker, WinnerPicker};
pub use merchandising::MerchandisingPanel;
pub use notice::NoticeBroadcaster;
pub use poll::PollManager;
pub use qa::QAManager;
pub use registry::SessionRegistry;
pub use roster::Roster;
pub use session::{SessionContext, SessionController};
