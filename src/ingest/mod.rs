//! Message ingestion for TaskFlow.
//!
//! Scanners pull new messages from the connected channels (Gmail, Slack,
//! Telegram), hand each one to the AI classifier, and store a pending
//! draft per positive classification. A cancellable scheduler drives
//! recurring scans per user and source.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
