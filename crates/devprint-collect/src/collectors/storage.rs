use crate::env::{Environment, StorageArea, StorageBackend};
use crate::error::ProbeError;
use crate::probe::{Collector, Probe};
use serde::Serialize;
use tracing::debug;

/// Key written and removed to probe an area.
pub const PROBE_KEY: &str = "__devprint_test__";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSignals {
    pub session_storage: bool,
    pub local_storage: bool,
    #[serde(rename = "indexedDB")]
    pub indexed_db: bool,
}

pub struct StorageCollector;

/// Write then delete a probe key. Any failure, including a refused open,
/// counts as unavailable.
pub fn probe_area(backend: &dyn StorageBackend, area: StorageArea) -> bool {
    let attempt = || -> Result<(), ProbeError> {
        let mut store = backend.open(area)?;
        store.set_item(PROBE_KEY, PROBE_KEY)?;
        store.remove_item(PROBE_KEY)
    };
    match attempt() {
        Ok(()) => true,
        Err(e) => {
            debug!(area = area.name(), error = %e, "storage probe failed");
            false
        }
    }
}

#[async_trait::async_trait]
impl Collector for StorageCollector {
    type Output = StorageSignals;

    fn name(&self) -> &'static str {
        "storage"
    }

    /// Always available: each area degrades to `false` on its own.
    async fn collect(&self, env: &Environment) -> Probe<StorageSignals> {
        let backend = env.storage.as_ref();
        let signals = StorageSignals {
            session_storage: probe_area(backend, StorageArea::Session),
            local_storage: probe_area(backend, StorageArea::Local),
            indexed_db: probe_area(backend, StorageArea::IndexedDb),
        };
        Probe::from_outcome(self.name(), Ok(Some(signals)))
    }
}
