//! HTTP ingestion adapters.

mod classifier;

pub use classifier::{ClassifierConfig, HttpTaskClassifier};
