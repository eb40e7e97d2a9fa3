//! Queue-backed message source for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::draft::domain::Source;
use crate::ingest::{
    domain::InboundMessage,
    ports::{MessageSource, SourceError, SourceResult},
};

/// Message source that pops pre-loaded messages from a queue.
///
/// Errors can be scripted to exercise the scanner's failure paths.
#[derive(Debug, Clone)]
pub struct QueueMessageSource {
    source: Source,
    state: Arc<Mutex<QueueState>>,
}

#[derive(Debug, Default)]
struct QueueState {
    queue: VecDeque<InboundMessage>,
    next_error: Option<SourceError>,
}

impl QueueMessageSource {
    /// Creates an empty queue source for the given channel.
    #[must_use]
    pub fn new(source: Source) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(QueueState::default())),
        }
    }

    /// Appends a message to the back of the queue.
    pub fn push(&self, message: InboundMessage) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.queue.push_back(message);
    }

    /// Makes the next `fetch_new` call fail with the given error.
    pub fn fail_next(&self, error: SourceError) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_error = Some(error);
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> SourceError {
    SourceError::fetch(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MessageSource for QueueMessageSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch_new(
        &self,
        since: Option<DateTime<Utc>>,
        limit: usize,
    ) -> SourceResult<Vec<InboundMessage>> {
        let mut state = self.state.lock().map_err(lock_poisoned)?;
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        let mut fetched = Vec::new();
        while fetched.len() < limit {
            let Some(message) = state.queue.pop_front() else {
                break;
            };
            if since.is_some_and(|cutoff| message.received_at() <= cutoff) {
                continue;
            }
            fetched.push(message);
        }
        Ok(fetched)
    }
}
