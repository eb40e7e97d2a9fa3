//! Per-user, per-source integration state.

use super::{ScanSettings, status};
use crate::draft::domain::Source;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection state, scan history, and settings for one integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationState {
    connected: bool,
    account_label: Option<String>,
    last_scan_at: Option<DateTime<Utc>>,
    settings: ScanSettings,
}

impl IntegrationState {
    /// Returns a connected state labelled with the external account.
    #[must_use]
    pub fn connected(account_label: impl Into<String>) -> Self {
        Self {
            connected: true,
            account_label: Some(account_label.into()),
            last_scan_at: None,
            settings: ScanSettings::DEFAULT,
        }
    }

    /// Returns whether the integration is connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns the external account label, if known.
    #[must_use]
    pub fn account_label(&self) -> Option<&str> {
        self.account_label.as_deref()
    }

    /// Returns the most recent scan timestamp, if any.
    #[must_use]
    pub const fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        self.last_scan_at
    }

    /// Returns the scan settings.
    #[must_use]
    pub const fn settings(&self) -> ScanSettings {
        self.settings
    }

    /// Marks the integration disconnected, keeping the account label so
    /// a reconnect can show what was linked before.
    pub const fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Records a completed scan.
    pub const fn record_scan(&mut self, at: DateTime<Utc>) {
        self.last_scan_at = Some(at);
    }

    /// Replaces the scan settings.
    pub const fn update_settings(&mut self, settings: ScanSettings) {
        self.settings = settings;
    }

    /// Projects the state into the per-source status payload.
    #[must_use]
    pub fn status(&self, source: Source) -> status::IntegrationStatus {
        match source {
            Source::Gmail => status::IntegrationStatus::Gmail(status::GmailStatus {
                connected: self.connected,
                email_address: self.account_label.clone(),
                last_scan_at: self.last_scan_at,
            }),
            Source::Slack => status::IntegrationStatus::Slack(status::SlackStatus {
                connected: self.connected,
                team_name: self.account_label.clone(),
                last_scan_at: self.last_scan_at,
            }),
            Source::Telegram => status::IntegrationStatus::Telegram(status::TelegramStatus {
                connected: self.connected,
                chat_label: self.account_label.clone(),
                last_scan_at: self.last_scan_at,
            }),
        }
    }
}
