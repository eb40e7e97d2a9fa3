//! Domain types for message ingestion and integration state.

mod error;
mod message;
mod proposal;
mod settings;
mod state;
mod status;

pub use error::IngestDomainError;
pub use message::{InboundMessage, MessageContext};
pub use proposal::{MAX_PROPOSAL_TAGS, TaskProposal};
pub use settings::ScanSettings;
pub use state::IntegrationState;
pub use status::{GmailStatus, IntegrationStatus, SlackStatus, TelegramStatus};
