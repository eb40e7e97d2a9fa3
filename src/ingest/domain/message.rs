//! Inbound messages fetched from external channels.

use crate::draft::domain::Source;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel-specific context attached to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContext {
    /// Context for an email message.
    Email {
        /// Subject line of the email.
        subject: String,
        /// Addresses participating in the thread.
        participants: Vec<String>,
    },
    /// Context for a Slack message.
    Slack {
        /// Channel the message was posted in.
        channel: String,
    },
    /// Context for a Telegram message.
    Telegram {
        /// Chat the message was posted in.
        chat_id: i64,
    },
}

impl MessageContext {
    /// Returns the source channel this context belongs to.
    #[must_use]
    pub const fn source(&self) -> Source {
        match self {
            Self::Email { .. } => Source::Gmail,
            Self::Slack { .. } => Source::Slack,
            Self::Telegram { .. } => Source::Telegram,
        }
    }
}

/// A single message pulled from an external channel, pending
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    external_id: String,
    body: String,
    context: MessageContext,
    received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Creates an inbound message.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        body: impl Into<String>,
        context: MessageContext,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            body: body.into(),
            context,
            received_at,
        }
    }

    /// Returns the channel-assigned message identifier.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Returns the message text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the channel-specific context.
    #[must_use]
    pub const fn context(&self) -> &MessageContext {
        &self.context
    }

    /// Returns the source channel, derived from the context.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.context.source()
    }

    /// Returns when the channel received the message.
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
