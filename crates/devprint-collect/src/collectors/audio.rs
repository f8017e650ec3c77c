use crate::env::{AudioGraph, AudioGraphConfig, CompressorSettings, Environment, Waveform};
use crate::error::ProbeError;
use crate::probe::{Collector, Probe};
use devprint_core::canon::format_number;
use devprint_core::hash::fast_hash;
use std::time::Duration;
use tracing::debug;

/// Constructor names tried in order.
pub const CONTEXT_ALIASES: [&str; 2] = ["AudioContext", "webkitAudioContext"];

/// Hard ceiling on the processing wait, whatever the caller requests.
pub const MAX_WAIT: Duration = Duration::from_millis(500);

/// Number of leading analyser bins that feed the digest.
pub const SAMPLED_BINS: usize = 30;

/// Silent processing graph whose compressor output varies by audio stack.
pub const GRAPH: AudioGraphConfig = AudioGraphConfig {
    waveform: Waveform::Triangle,
    frequency_hz: 10_000.0,
    compressor: CompressorSettings {
        threshold: -50.0,
        knee: 40.0,
        ratio: 12.0,
        attack: 0.0,
        release: 0.25,
    },
    gain: 0.0,
};

/// Runs a muted oscillator through a compressor for a bounded time and
/// digests the analyser's frequency data.
#[derive(Debug, Clone, Copy)]
pub struct AudioCollector {
    requested: Duration,
}

impl AudioCollector {
    pub fn new(requested: Duration) -> Self {
        Self { requested }
    }

    /// The requested wait, capped at [`MAX_WAIT`].
    pub fn wait(&self) -> Duration {
        self.requested.min(MAX_WAIT)
    }

    async fn fingerprint(&self, env: &Environment) -> Result<Option<String>, ProbeError> {
        let Some(mut graph) = open_context(env)? else {
            return Ok(None);
        };
        let sampled = sample(graph.as_mut(), self.wait()).await;
        // Tear down on every path once the graph exists.
        let stopped = graph.stop();
        let closed = graph.close();
        let data = sampled?;
        stopped?;
        closed?;
        Ok(Some(digest_frequency_data(&data)))
    }
}

impl Default for AudioCollector {
    fn default() -> Self {
        Self::new(Duration::from_millis(devprint_core::options::DEFAULT_TIMEOUT_MS))
    }
}

fn open_context(env: &Environment) -> Result<Option<Box<dyn AudioGraph + '_>>, ProbeError> {
    for alias in CONTEXT_ALIASES {
        if let Some(graph) = env.audio.create_context(alias)? {
            debug!(alias, "audio context created");
            return Ok(Some(graph));
        }
    }
    Ok(None)
}

async fn sample(graph: &mut dyn AudioGraph, wait: Duration) -> Result<Vec<f32>, ProbeError> {
    graph.build(&GRAPH)?;
    graph.start()?;
    tokio::time::sleep(wait).await;
    graph.frequency_data()
}

/// Fast digest of the first [`SAMPLED_BINS`] values, comma-joined.
pub fn digest_frequency_data(data: &[f32]) -> String {
    let joined = data
        .iter()
        .take(SAMPLED_BINS)
        .map(|v| format_number(f64::from(*v)))
        .collect::<Vec<_>>()
        .join(",");
    fast_hash(&joined)
}

#[async_trait::async_trait]
impl Collector for AudioCollector {
    type Output = String;

    fn name(&self) -> &'static str {
        "audio"
    }

    async fn collect(&self, env: &Environment) -> Probe<String> {
        Probe::from_outcome(self.name(), self.fingerprint(env).await)
    }
}
