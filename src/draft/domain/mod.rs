//! Domain model for draft-task review.
//!
//! The draft domain models AI-proposed tasks awaiting human review: the
//! draft aggregate, its one-way status machine, the partial-edit overlay,
//! and the source channel and confidence scalars, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod draft;
mod error;
mod fields;
mod ids;
mod status;

pub use draft::{DraftTask, NewDraft, PersistedDraftData};
pub use error::{DraftDomainError, ParseDraftStatusError, ParseSourceError};
pub use fields::{Confidence, DraftEdit, DraftFields, Source};
pub use ids::DraftId;
pub use status::DraftStatus;
