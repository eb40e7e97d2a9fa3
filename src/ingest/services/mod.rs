//! Application services for message ingestion.

mod scanner;
mod scheduler;

pub use scanner::{ScanError, ScanJob, ScanReport, ScanResult, Scanner};
pub use scheduler::ScanScheduler;
