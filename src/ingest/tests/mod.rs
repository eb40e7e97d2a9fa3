//! Unit tests for the ingest module.

mod scanner_tests;
mod scheduler_tests;

use crate::ingest::domain::{InboundMessage, MessageContext};
use chrono::Utc;

/// Builds an inbound email with the given external id.
fn email(external_id: &str, subject: &str, body: &str) -> InboundMessage {
    InboundMessage::new(
        external_id,
        body,
        MessageContext::Email {
            subject: subject.to_owned(),
            participants: vec!["sender@example.com".to_owned()],
        },
        Utc::now(),
    )
}
