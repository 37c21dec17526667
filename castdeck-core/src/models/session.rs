use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::id::SessionId;
use super::product::Product;

/// Session classification supplied by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastType {
    General,
    Commerce,
    Vod,
}

impl BroadcastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Commerce => "commerce",
            Self::Vod => "vod",
        }
    }
}

impl FromStr for BroadcastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "commerce" => Ok(Self::Commerce),
            "vod" => Ok(Self::Vod),
            _ => Err(format!("Unknown broadcast type: {s}")),
        }
    }
}

impl std::fmt::Display for BroadcastType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    /// Terminal
    Ended,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub broadcast_type: BroadcastType,
    pub status: SessionStatus,
    pub title: String,
    pub platforms: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(broadcast_type: BroadcastType, title: String, platforms: Vec<String>) -> Self {
        Self {
            id: SessionId::new(),
            broadcast_type,
            status: SessionStatus::Active,
            title,
            platforms,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Initial configuration produced by the scheduling wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub title: String,
    /// Target platforms the broadcast is relayed to
    pub platforms: Vec<String>,
    /// Products that may be attached to the merchandising panel
    pub catalog: Vec<Product>,
}

/// Console panel shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Merchandising,
    Polls,
    QuestionsAndAnswers,
    Giveaways,
    Notices,
}

/// Panels visible for a broadcast type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSelection {
    pub broadcast_type: BroadcastType,
    pub panels: Vec<Panel>,
}

impl PanelSelection {
    /// Commerce and VOD broadcasts sell products, general broadcasts engage.
    #[must_use]
    pub fn for_broadcast(broadcast_type: BroadcastType) -> Self {
        let panels = match broadcast_type {
            BroadcastType::Commerce | BroadcastType::Vod => {
                vec![Panel::Merchandising, Panel::Notices]
            }
            BroadcastType::General => vec![
                Panel::Polls,
                Panel::QuestionsAndAnswers,
                Panel::Giveaways,
                Panel::Notices,
            ],
        };

        Self {
            broadcast_type,
            panels,
        }
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }
}
