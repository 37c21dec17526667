//! Line-oriented operator console
//!
//! Each input line is one JSON [`Command`]. Results are written to stdout
//! as `{"ok": <delta>}` or `{"error": {"kind", "message"}}`.

use anyhow::Result;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use castdeck_core::{
    models::{Command, SessionEvent, SessionId, SessionSnapshot, StateDelta},
    service::SessionRegistry,
    Error, ErrorKind,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<'a> {
    Ok(&'a StateDelta),
    Error { kind: ErrorKind, message: String },
    Snapshot(&'a SessionSnapshot),
}

impl<'a> Outcome<'a> {
    pub fn from_result(result: &'a castdeck_core::Result<StateDelta>) -> Self {
        match result {
            Ok(delta) => Self::Ok(delta),
            Err(e) => Self::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
}

pub struct Console {
    registry: SessionRegistry,
    session_id: SessionId,
    pretty: bool,
}

impl Console {
    pub const fn new(registry: SessionRegistry, session_id: SessionId, pretty: bool) -> Self {
        Self {
            registry,
            session_id,
            pretty,
        }
    }

    /// Apply commands until end of input or Ctrl-C
    pub async fn run<R>(&self, input: R) -> Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut summary = RunSummary::default();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, closing operator input");
                    break;
                }
            };
            let Some(line) = line else { break };

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let result = self.apply_line(line).await;
            if let Err(e) = &result {
                if !e.is_domain() && !matches!(e, Error::Serialization(_)) {
                    return Err(anyhow::anyhow!("Session failed: {e}"));
                }
                summary.rejected += 1;
            } else {
                summary.applied += 1;
            }
            self.emit(&Outcome::from_result(&result))?;
        }

        Ok(summary)
    }

    pub async fn apply_line(&self, line: &str) -> castdeck_core::Result<StateDelta> {
        let command: Command = serde_json::from_str(line)?;
        debug!(command = command.name(), "Operator command");
        self.registry.execute(Some(&self.session_id), command).await
    }

    /// End the session unless the script already did and print the final snapshot
    pub async fn finish(&self) -> Result<Option<SessionSnapshot>> {
        if self.registry.get(&self.session_id).is_none() {
            return Ok(None);
        }
        let snapshot = self.registry.end_session(&self.session_id).await?;
        self.emit(&Outcome::Snapshot(&snapshot))?;
        Ok(Some(snapshot))
    }

    fn emit(&self, outcome: &Outcome<'_>) -> Result<()> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(outcome)?
        } else {
            serde_json::to_string(outcome)?
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Log every session event until the channel closes
pub fn spawn_event_logger(mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    info!(
                        session_id = %event.session_id(),
                        event_type = event.event_type(),
                        "Session event"
                    );
                }
                Err(RecvError::Lagged(n)) => {
                    warn!("Event logger lagged by {} events", n);
                }
                Err(RecvError::Closed) => {
                    debug!("Event channel closed, stopping logger");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use castdeck_core::config::SessionSettings;
    use castdeck_core::models::{BroadcastType, SessionConfig};

    fn console() -> Console {
        let registry = SessionRegistry::new(SessionSettings::default());
        let session = registry.create_session(BroadcastType::General, SessionConfig::default());
        Console::new(registry, session.id, false)
    }

    #[tokio::test]
    async fn test_run_counts_outcomes() {
        let console = console();
        let script = concat!(
            "# warm up\n",
            "{\"type\":\"add_banned_word\",\"word\":\"spam\"}\n",
            "\n",
            "{\"type\":\"add_banned_word\",\"word\":\"spam\"}\n",
            "not json\n",
            "{\"type\":\"send_notice\",\"message\":\"Welcome\"}\n",
        );

        let summary = console.run(script.as_bytes()).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                applied: 2,
                rejected: 2
            }
        );
    }

    #[tokio::test]
    async fn test_general_demo_script() {
        let console = console();
        let script = include_str!("../../demos/general.jsonl");

        let summary = console.run(script.as_bytes()).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                applied: 6,
                rejected: 1
            }
        );

        let snapshot = console.finish().await.unwrap().unwrap();
        assert_eq!(snapshot.polls.len(), 1);
        assert_eq!(snapshot.questions.len(), 3);
        assert_eq!(snapshot.questions[1].author, "Anonymous");
        assert!(snapshot.giveaways[0].winner.is_none());
    }

    #[tokio::test]
    async fn test_finish_after_scripted_end() {
        let console = console();
        console
            .run("{\"type\":\"end_session\"}\n".as_bytes())
            .await
            .unwrap();
        assert!(console.finish().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_finish_ends_session() {
        let console = console();
        let snapshot = console.finish().await.unwrap().unwrap();
        assert!(snapshot.session.status.is_ended());
    }

    #[test]
    fn test_outcome_shape() {
        let result: castdeck_core::Result<StateDelta> = Err(Error::NotFound("Poll p1".into()));
        let json = serde_json::to_value(Outcome::from_result(&result)).unwrap();
        assert_eq!(json["error"]["kind"], "not_found");
        assert_eq!(json["error"]["message"], "Not found: Poll p1");
    }
}
