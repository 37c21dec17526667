//! Single-writer session actor
//!
//! Several operator clients may drive one session. Their commands are
//! queued on a bounded channel and applied one at a time by the task that
//! owns the [`SessionController`]; each caller gets its own reply.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::{
    models::{BroadcastType, Command, SessionId, SessionSnapshot, StateDelta},
    service::SessionController,
    Error, Result,
};

enum SessionRequest {
    Execute {
        command: Command,
        reply: oneshot::Sender<Result<StateDelta>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Cloneable handle to a running session actor
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    broadcast_type: BroadcastType,
    sender: mpsc::Sender<SessionRequest>,
}

impl std::fmt::Debug for SessionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Execute { command, .. } => f
                .debug_struct("Execute")
                .field("command", &command.name())
                .finish_non_exhaustive(),
            Self::Snapshot { .. } => f.debug_struct("Snapshot").finish_non_exhaustive(),
        }
    }
}

impl SessionHandle {
    /// Move the controller onto its own task; must be called inside a tokio runtime
    pub fn spawn(controller: SessionController, queue_capacity: usize) -> Self {
        let session_id = controller.session().id.clone();
        let broadcast_type = controller.session().broadcast_type;
        let (sender, receiver) = mpsc::channel(queue_capacity.max(1));

        tokio::spawn(run(controller, receiver));

        Self {
            session_id,
            broadcast_type,
            sender,
        }
    }

    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub const fn broadcast_type(&self) -> BroadcastType {
        self.broadcast_type
    }

    /// Queue a command and wait for its result
    pub async fn execute(&self, command: Command) -> Result<StateDelta> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Execute { command, reply })
            .await?;
        response.await?
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, response) = oneshot::channel();
        self.sender.send(SessionRequest::Snapshot { reply }).await?;
        Ok(response.await?)
    }

    /// End the session and return the final snapshot
    pub async fn end_session(&self) -> Result<SessionSnapshot> {
        match self.execute(Command::EndSession).await? {
            StateDelta::SessionEnded { snapshot } => Ok(*snapshot),
            other => Err(Error::Internal(format!(
                "Unexpected reply to end_session: {other:?}"
            ))),
        }
    }
}

async fn run(mut controller: SessionController, mut receiver: mpsc::Receiver<SessionRequest>) {
    let session_id = controller.session().id.clone();
    debug!(session_id = %session_id, "Session actor started");

    while let Some(request) = receiver.recv().await {
        match request {
            SessionRequest::Execute { command, reply } => {
                let result = controller.handle(command);
                if reply.send(result).is_err() {
                    debug!(session_id = %session_id, "Command caller went away before the reply");
                }
            }
            SessionRequest::Snapshot { reply } => {
                let _ = reply.send(controller.snapshot());
            }
        }
    }

    info!(
        session_id = %session_id,
        status = %controller.session().status.as_str(),
        "Session actor stopped, all handles dropped"
    );
}
