//! Remote HTTP adapter for the canonical task store.

mod client;

pub use client::{RemoteStoreConfig, RemoteTaskStore};
