//! Signal collectors and the host capabilities they read through.

pub mod collectors;
pub mod env;
pub mod error;
pub mod probe;
pub mod profile;

pub use env::Environment;
pub use error::ProbeError;
pub use probe::{Collector, Probe};
pub use profile::{HostProfile, ProfileError};
