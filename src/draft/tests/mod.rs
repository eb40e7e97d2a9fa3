//! Unit tests for the draft module.

mod review_service_tests;

use crate::draft::domain::{DraftFields, NewDraft, Source};
use mockable::DefaultClock;

/// Builds an unsaved gmail draft with the given non-empty title.
fn new_gmail_draft(title: &str) -> NewDraft {
    let fields = DraftFields::new(title).expect("test titles are non-empty");
    NewDraft::new(Source::Gmail, fields, None, &DefaultClock)
}
