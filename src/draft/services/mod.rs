//! Application services for draft review orchestration.

mod review;

pub use review::{
    ApprovedDraft, BulkEntry, BulkReport, DraftReviewError, DraftReviewResult, DraftReviewService,
};
