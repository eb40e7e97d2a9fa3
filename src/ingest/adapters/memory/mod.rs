//! In-memory ingestion adapters.

mod classifier;
mod source;
mod state;

pub use classifier::ScriptedClassifier;
pub use source::QueueMessageSource;
pub use state::InMemoryIntegrationStateRepository;
