//! Live session controller
//!
//! Owns every piece of state belonging to one broadcast and is the only
//! place that state is mutated. The operator console sends [`Command`]s;
//! each one is routed to the owning component and answered with either a
//! [`StateDelta`] for re-rendering or exactly one domain [`Error`].
//!
//! Once the session has ended every command fails with
//! [`Error::InvalidState`]; [`SessionController::snapshot`] stays readable.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, info_span};

use crate::{
    config::SessionSettings,
    models::{
        BroadcastType, Command, PanelSelection, Session, SessionConfig, SessionEvent,
        SessionSnapshot, SessionStatus, StateDelta,
    },
    service::{
        BannedWordFilter, ChatModerator, EngagementHub, EventSink, MerchandisingPanel,
        NoopEventSink, RandomPicker, Roster, WinnerPicker,
    },
    Error, Result,
};

/// Collaborators and limits injected into a new session
#[derive(Clone)]
pub struct SessionContext {
    pub settings: SessionSettings,
    pub picker: Arc<dyn WinnerPicker>,
    pub events: Arc<dyn EventSink>,
}

impl SessionContext {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            picker: Arc::new(RandomPicker),
            events: Arc::new(NoopEventSink),
        }
    }

    #[must_use]
    pub fn with_picker(mut self, picker: Arc<dyn WinnerPicker>) -> Self {
        self.picker = picker;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("settings", &self.settings)
            .field("picker", &self.picker)
            .finish_non_exhaustive()
    }
}

/// Aggregate owning one live session
pub struct SessionController {
    session: Session,
    panels: PanelSelection,
    chat: ChatModerator,
    roster: Roster,
    merchandising: MerchandisingPanel,
    engagement: EngagementHub,
    enforce_panels: bool,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session_id", &self.session.id)
            .field("status", &self.session.status)
            .finish()
    }
}

impl SessionController {
    /// Start a broadcast with empty components
    pub fn create_session(
        broadcast_type: BroadcastType,
        config: SessionConfig,
        context: SessionContext,
    ) -> Self {
        let SessionConfig {
            title,
            platforms,
            catalog,
        } = config;
        let settings = &context.settings;

        let session = Session::new(broadcast_type, title, platforms);
        let filter = BannedWordFilter::with_words(&settings.default_banned_words);

        info!(
            session_id = %session.id,
            broadcast_type = %broadcast_type,
            platforms = ?session.platforms,
            catalog_size = catalog.len(),
            "Session created"
        );

        Self {
            panels: PanelSelection::for_broadcast(broadcast_type),
            chat: ChatModerator::new(filter, settings.max_chat_length),
            roster: Roster::new(),
            merchandising: MerchandisingPanel::new(catalog),
            engagement: EngagementHub::new(settings, context.picker),
            enforce_panels: settings.enforce_panel_capabilities,
            events: context.events,
            session,
        }
    }

    /// Execute one operator command
    pub fn handle(&mut self, command: Command) -> Result<StateDelta> {
        let span = info_span!(
            "session_command",
            session_id = %self.session.id,
            command = command.name()
        );
        let _guard = span.enter();

        let result = self.route(command);
        if let Err(e) = &result {
            if e.is_domain() {
                debug!(error = %e, kind = %e.kind(), "Command rejected");
            } else {
                error!(error = %e, "Command failed");
            }
        }
        result
    }

    fn route(&mut self, command: Command) -> Result<StateDelta> {
        self.ensure_active()?;

        if self.enforce_panels {
            if let Some(panel) = command.panel() {
                if !self.panels.is_visible(panel) {
                    return Err(Error::InvalidState(format!(
                        "{panel:?} panel is not available for {} broadcasts",
                        self.session.broadcast_type
                    )));
                }
            }
        }

        match command {
            Command::CreateSession { .. } => Err(Error::InvalidState(format!(
                "Session {} already exists",
                self.session.id
            ))),
            Command::EndSession => {
                let snapshot = self.end_session()?;
                Ok(StateDelta::SessionEnded {
                    snapshot: Box::new(snapshot),
                })
            }

            // Chat
            Command::PostChatMessage {
                author,
                text,
                is_host,
            } => match self.chat.post_message(&author, &text, is_host) {
                Ok(message) => {
                    self.publish(SessionEvent::MessagePosted {
                        session_id: self.session.id.clone(),
                        message: message.clone(),
                    });
                    Ok(StateDelta::MessagePosted { message })
                }
                Err(Error::Blocked(word)) => {
                    self.publish(SessionEvent::MessageBlocked {
                        session_id: self.session.id.clone(),
                        author: author.trim().to_string(),
                        matched_word: word.clone(),
                        timestamp: Utc::now(),
                    });
                    Err(Error::Blocked(word))
                }
                Err(e) => Err(e),
            },
            Command::AddBannedWord { word } => {
                self.chat.add_banned_word(&word)?;
                Ok(self.banned_words_delta())
            }
            Command::RemoveBannedWord { word } => {
                self.chat.remove_banned_word(&word)?;
                Ok(self.banned_words_delta())
            }

            // Roster
            Command::JoinViewer {
                viewer_id,
                username,
                timestamp,
            } => {
                let viewer = self.roster.join(viewer_id, &username, timestamp)?;
                Ok(StateDelta::ViewerJoined { viewer })
            }

            // Merchandising
            Command::AddProduct { product } => {
                let product = self.merchandising.add_product(product)?;
                Ok(StateDelta::ProductUpdated { product })
            }
            Command::AttachFromCatalog { product_id } => {
                let product = self.merchandising.attach_from_catalog(&product_id)?;
                Ok(StateDelta::ProductUpdated { product })
            }
            Command::ToggleProductActive { product_id } => {
                let product = self.merchandising.toggle_active(&product_id)?;
                self.publish(SessionEvent::ProductToggled {
                    session_id: self.session.id.clone(),
                    product: product.clone(),
                });
                Ok(StateDelta::ProductUpdated { product })
            }
            Command::RemoveProduct { product_id } => {
                let product = self.merchandising.remove_product(&product_id)?;
                Ok(StateDelta::ProductRemoved { product })
            }

            // Polls
            Command::CreatePoll { question, options } => {
                let poll = self.engagement.polls.create_poll(&question, &options)?;
                Ok(self.poll_updated(poll.results()))
            }
            Command::Vote { poll_id, option_id } => {
                let poll = self.engagement.polls.vote(&poll_id, &option_id)?;
                Ok(self.poll_updated(poll.results()))
            }
            Command::SetPollActive { poll_id, active } => {
                let poll = self.engagement.polls.set_active(&poll_id, active)?;
                Ok(self.poll_updated(poll.results()))
            }
            Command::DeletePoll { poll_id } => {
                let poll = self.engagement.polls.delete_poll(&poll_id)?;
                Ok(StateDelta::PollDeleted { poll_id: poll.id })
            }

            // Q&A
            Command::SubmitQuestion { author, text } => {
                self.engagement.questions.submit_question(&author, &text)?;
                Ok(self.questions_changed())
            }
            Command::ToggleAnswered { question_id } => {
                self.engagement.questions.toggle_answered(&question_id)?;
                Ok(self.questions_changed())
            }
            Command::TogglePinned { question_id } => {
                self.engagement.questions.toggle_pinned(&question_id)?;
                Ok(self.questions_changed())
            }
            Command::DeleteQuestion { question_id } => {
                self.engagement.questions.delete_question(&question_id)?;
                Ok(self.questions_changed())
            }

            // Giveaways
            Command::CreateGiveaway { title, prize } => {
                let giveaway = self.engagement.giveaways.create_giveaway(&title, &prize)?;
                Ok(StateDelta::GiveawayUpdated { giveaway })
            }
            Command::EnterGiveaway {
                giveaway_id,
                participant,
            } => {
                let giveaway = self.engagement.giveaways.enter(&giveaway_id, &participant)?;
                Ok(StateDelta::GiveawayUpdated { giveaway })
            }
            Command::SelectWinner { giveaway_id } => {
                let giveaway = self.engagement.giveaways.select_winner(&giveaway_id)?;
                let winner = giveaway.winner.clone().unwrap_or_default();
                self.publish(SessionEvent::GiveawayWinnerSelected {
                    session_id: self.session.id.clone(),
                    giveaway: giveaway.clone(),
                    winner,
                });
                Ok(StateDelta::GiveawayUpdated { giveaway })
            }
            Command::DeleteGiveaway { giveaway_id } => {
                let giveaway = self.engagement.giveaways.delete_giveaway(&giveaway_id)?;
                Ok(StateDelta::GiveawayDeleted {
                    giveaway_id: giveaway.id,
                })
            }

            // Notices
            Command::SendNotice { message } => {
                let notice = self.engagement.notices.send(&message)?;
                self.publish(SessionEvent::NoticeSent {
                    session_id: self.session.id.clone(),
                    notice: notice.clone(),
                });
                Ok(StateDelta::NoticeSent { notice })
            }
        }
    }

    /// Transition to `ended` and hand the final state to archival
    pub fn end_session(&mut self) -> Result<SessionSnapshot> {
        self.ensure_active()?;

        self.session.status = SessionStatus::Ended;
        self.session.ended_at = Some(Utc::now());
        let snapshot = self.snapshot();

        info!(
            session_id = %self.session.id,
            messages = snapshot.messages.len(),
            viewers = snapshot.viewers.len(),
            "Session ended"
        );

        self.publish(SessionEvent::SessionEnded {
            session_id: self.session.id.clone(),
            snapshot: Box::new(snapshot.clone()),
        });
        Ok(snapshot)
    }

    /// Full copy of the current state; available after the session ended
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session.clone(),
            panels: self.panels.clone(),
            messages: self.chat.messages().to_vec(),
            banned_words: self.chat.banned_words().to_vec(),
            viewers: self.roster.list().to_vec(),
            products: self.merchandising.products().to_vec(),
            polls: self
                .engagement
                .polls
                .polls()
                .iter()
                .map(|p| p.results())
                .collect(),
            questions: self.engagement.questions.list(),
            giveaways: self.engagement.giveaways.giveaways().to_vec(),
            notices: self.engagement.notices.history(),
            taken_at: Utc::now(),
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn panel_selection(&self) -> &PanelSelection {
        &self.panels
    }

    pub const fn chat(&self) -> &ChatModerator {
        &self.chat
    }

    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    pub const fn merchandising(&self) -> &MerchandisingPanel {
        &self.merchandising
    }

    pub const fn engagement(&self) -> &EngagementHub {
        &self.engagement
    }

    fn ensure_active(&self) -> Result<()> {
        if self.session.status.is_ended() {
            return Err(Error::InvalidState(format!(
                "Session {} has ended",
                self.session.id
            )));
        }
        Ok(())
    }

    fn publish(&self, event: SessionEvent) {
        self.events.publish(event);
    }

    fn banned_words_delta(&self) -> StateDelta {
        StateDelta::BannedWordsChanged {
            words: self.chat.banned_words().to_vec(),
        }
    }

    fn poll_updated(&self, results: crate::models::PollResults) -> StateDelta {
        self.publish(SessionEvent::PollUpdated {
            session_id: self.session.id.clone(),
            results: results.clone(),
        });
        StateDelta::PollUpdated { results }
    }

    fn questions_changed(&self) -> StateDelta {
        let questions = self.engagement.questions.list();
        self.publish(SessionEvent::QuestionListChanged {
            session_id: self.session.id.clone(),
            questions: questions.clone(),
        });
        StateDelta::QuestionsChanged { questions }
    }
}
