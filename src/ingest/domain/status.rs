//! Per-source integration status payloads.
//!
//! Each source gets its own explicitly typed status structure, carried
//! in a tagged enum so consumers can match on the source instead of
//! probing an untyped payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a Gmail integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmailStatus {
    /// Whether the mailbox is currently connected.
    pub connected: bool,
    /// Address of the connected mailbox, if known.
    pub email_address: Option<String>,
    /// Most recent scan timestamp, if any.
    pub last_scan_at: Option<DateTime<Utc>>,
}

/// Status of a Slack integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackStatus {
    /// Whether the workspace is currently connected.
    pub connected: bool,
    /// Name of the connected workspace, if known.
    pub team_name: Option<String>,
    /// Most recent scan timestamp, if any.
    pub last_scan_at: Option<DateTime<Utc>>,
}

/// Status of a Telegram integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramStatus {
    /// Whether the chat link is currently connected.
    pub connected: bool,
    /// Label of the linked chat, if known.
    pub chat_label: Option<String>,
    /// Most recent scan timestamp, if any.
    pub last_scan_at: Option<DateTime<Utc>>,
}

/// Source-tagged integration status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum IntegrationStatus {
    /// Gmail status payload.
    Gmail(GmailStatus),
    /// Slack status payload.
    Slack(SlackStatus),
    /// Telegram status payload.
    Telegram(TelegramStatus),
}

impl IntegrationStatus {
    /// Returns whether the integration is connected.
    #[must_use]
    pub const fn connected(&self) -> bool {
        match self {
            Self::Gmail(status) => status.connected,
            Self::Slack(status) => status.connected,
            Self::Telegram(status) => status.connected,
        }
    }

    /// Returns the most recent scan timestamp, if any.
    #[must_use]
    pub const fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Gmail(status) => status.last_scan_at,
            Self::Slack(status) => status.last_scan_at,
            Self::Telegram(status) => status.last_scan_at,
        }
    }
}
