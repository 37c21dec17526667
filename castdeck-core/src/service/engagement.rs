use std::sync::Arc;

use crate::{
    config::SessionSettings,
    models::{BroadcastType, PanelSelection},
    service::{GiveawayManager, NoticeBroadcaster, PollManager, QAManager, WinnerPicker},
};

/// Audience engagement widgets of one session
#[derive(Debug, Clone)]
pub struct EngagementHub {
    pub polls: PollManager,
    pub questions: QAManager,
    pub giveaways: GiveawayManager,
    pub notices: NoticeBroadcaster,
}

impl EngagementHub {
    #[must_use]
    pub fn new(settings: &SessionSettings, picker: Arc<dyn WinnerPicker>) -> Self {
        Self {
            polls: PollManager::new(settings.max_question_length),
            questions: QAManager::new(settings.max_question_length),
            giveaways: GiveawayManager::new(picker),
            notices: NoticeBroadcaster::new(settings.max_notice_length),
        }
    }

    /// Panels the console shows for a broadcast type
    #[must_use]
    pub fn panel_selection(broadcast_type: BroadcastType) -> PanelSelection {
        PanelSelection::for_broadcast(broadcast_type)
    }
}
