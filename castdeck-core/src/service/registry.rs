//! Registry of live sessions
//!
//! Maps session ids to running session actors and routes commands to them.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::{
    config::SessionSettings,
    models::{BroadcastType, Command, Session, SessionConfig, SessionId, SessionSnapshot, StateDelta},
    service::{
        EventSink, NoopEventSink, RandomPicker, SessionContext, SessionController, SessionHandle,
        WinnerPicker,
    },
    Error, Result,
};

#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<SessionId, SessionHandle>>,
    settings: SessionSettings,
    picker: Arc<dyn WinnerPicker>,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl SessionRegistry {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            settings,
            picker: Arc::new(RandomPicker),
            events: Arc::new(NoopEventSink),
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    #[must_use]
    pub fn with_picker(mut self, picker: Arc<dyn WinnerPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Start a session on its own actor; requires a tokio runtime
    pub fn create_session(&self, broadcast_type: BroadcastType, config: SessionConfig) -> Session {
        let context = SessionContext {
            settings: self.settings.clone(),
            picker: Arc::clone(&self.picker),
            events: Arc::clone(&self.events),
        };
        let controller = SessionController::create_session(broadcast_type, config, context);
        let session = controller.session().clone();

        let handle = SessionHandle::spawn(controller, self.settings.command_queue_capacity);
        self.sessions.insert(session.id.clone(), handle);

        info!(
            session_id = %session.id,
            live_sessions = self.sessions.len(),
            "Session registered"
        );
        session
    }

    pub fn get(&self, session_id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    fn require(&self, session_id: &SessionId) -> Result<SessionHandle> {
        self.get(session_id)
            .ok_or_else(|| Error::NotFound(format!("Session {session_id} not found")))
    }

    /// Route a command to a registered session
    ///
    /// `CreateSession` starts a new session and ignores `session_id`;
    /// `EndSession` also unregisters the session.
    pub async fn execute(
        &self,
        session_id: Option<&SessionId>,
        command: Command,
    ) -> Result<StateDelta> {
        if let Command::CreateSession {
            broadcast_type,
            config,
        } = command
        {
            let session = self.create_session(broadcast_type, config);
            return Ok(StateDelta::SessionCreated { session });
        }

        let session_id = session_id
            .ok_or_else(|| Error::InvalidInput("A session id is required".to_string()))?;

        if matches!(command, Command::EndSession) {
            let snapshot = self.end_session(session_id).await?;
            return Ok(StateDelta::SessionEnded {
                snapshot: Box::new(snapshot),
            });
        }

        self.require(session_id)?.execute(command).await
    }

    /// End a session, unregister it and return its final snapshot
    ///
    /// A session already ended through its own handle fails with
    /// [`Error::InvalidState`] and is unregistered.
    pub async fn end_session(&self, session_id: &SessionId) -> Result<SessionSnapshot> {
        let handle = self.require(session_id)?;

        match handle.end_session().await {
            Ok(snapshot) => {
                self.unregister(session_id);
                Ok(snapshot)
            }
            Err(Error::InvalidState(reason)) => {
                if handle.snapshot().await?.session.status.is_ended() {
                    self.unregister(session_id);
                }
                Err(Error::InvalidState(reason))
            }
            Err(e) => Err(e),
        }
    }

    fn unregister(&self, session_id: &SessionId) {
        if self.sessions.remove(session_id).is_some() {
            info!(
                session_id = %session_id,
                live_sessions = self.sessions.len(),
                "Session unregistered"
            );
        }
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
