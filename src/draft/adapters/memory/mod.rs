//! In-memory draft repository adapter.

mod draft;

pub use draft::InMemoryDraftRepository;
