//! Aggregation pipeline: run the collectors, merge their signals, and derive
//! the device identifier and confidence score.

mod error;
mod fingerprinter;

pub use error::FingerprintError;
pub use fingerprinter::{collect_signals, Fingerprinter};
