use crate::env::Environment;
use crate::error::ProbeError;
use tracing::{debug, warn};

/// Tagged outcome of a collector. The pipeline only ever sees this, never
/// a raw [`ProbeError`].
#[derive(Debug, Clone, PartialEq)]
pub enum Probe<T> {
    Available(T),
    Unavailable,
}

impl<T> Probe<T> {
    /// Fold a capability outcome into a probe, logging why a signal is
    /// missing. `Ok(None)` is "capability absent", `Err` is "capability
    /// threw"; both become [`Probe::Unavailable`].
    pub fn from_outcome(collector: &str, outcome: Result<Option<T>, ProbeError>) -> Self {
        match outcome {
            Ok(Some(value)) => {
                debug!(collector, available = true, "signal collected");
                Probe::Available(value)
            }
            Ok(None) => {
                debug!(collector, available = false, "capability not present");
                Probe::Unavailable
            }
            Err(e) => {
                warn!(collector, error = %e, "collector degraded");
                Probe::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Probe::Available(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Probe::Available(v) => Some(v),
            Probe::Unavailable => None,
        }
    }
}

impl<T: Default> Probe<T> {
    /// The value, or the type's declared unavailable value.
    pub fn unwrap_or_unavailable(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// A single signal source. Implementations must not let failures escape:
/// every error is reported as [`Probe::Unavailable`].
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    type Output: Send;

    fn name(&self) -> &'static str;

    async fn collect(&self, env: &Environment) -> Probe<Self::Output>;
}
