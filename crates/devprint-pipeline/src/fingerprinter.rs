use crate::error::FingerprintError;
use devprint_collect::collectors::{
    AudioCollector, CanvasCollector, FontsCollector, LocaleCollector, PlatformCollector,
    ScreenCollector, StorageCollector, WebGlCollector, WebGlSignals,
};
use devprint_collect::{Collector, Environment};
use devprint_core::canon::{canonical_identity_string, confidence};
use devprint_core::{
    now_millis, Digester, FingerprintOptions, FingerprintResult, ResolvedOptions, Sha256Digester,
    SignalRecord, ALGORITHM_VERSION,
};
use std::sync::Arc;
use tracing::debug;

/// Derives device identifiers from an [`Environment`].
///
/// Holds no per-call state: every call collects afresh, and concurrent calls
/// on one `Fingerprinter` are independent.
#[derive(Clone)]
pub struct Fingerprinter {
    env: Environment,
    digester: Arc<dyn Digester>,
}

impl Fingerprinter {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            digester: Arc::new(Sha256Digester),
        }
    }

    /// Replace the identifier digest primitive.
    pub fn with_digester(mut self, digester: Arc<dyn Digester>) -> Self {
        self.digester = digester;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Collect every enabled signal and derive the identifier and
    /// confidence. Fails only when the digest primitive does.
    pub async fn generate_fingerprint(
        &self,
        options: &FingerprintOptions,
    ) -> Result<FingerprintResult, FingerprintError> {
        let resolved = options.resolve();
        let signals = collect_signals(&self.env, &resolved).await;

        let canonical = canonical_identity_string(&signals);
        let device_id = self.digester.digest_hex(&canonical)?;
        let confidence = confidence(&signals);
        debug!(
            alg = self.digester.alg(),
            confidence,
            identity_len = canonical.len(),
            "fingerprint generated"
        );

        Ok(FingerprintResult {
            device_id,
            confidence,
            signals,
            timestamp: now_millis(),
            version: ALGORITHM_VERSION.to_string(),
        })
    }

    /// Same identifier [`generate_fingerprint`](Self::generate_fingerprint)
    /// would return for these options.
    pub async fn generate_device_id(
        &self,
        options: &FingerprintOptions,
    ) -> Result<String, FingerprintError> {
        Ok(self.generate_fingerprint(options).await?.device_id)
    }
}

/// Run the collectors and merge their outputs into one record.
///
/// Display, platform, locale and storage run unconditionally, then WebGL if
/// enabled. Canvas, audio and fonts are then dispatched together and
/// awaited as a group; a disabled one is never invoked.
pub async fn collect_signals(env: &Environment, options: &ResolvedOptions) -> SignalRecord {
    let screen = ScreenCollector.collect(env).await.unwrap_or_unavailable();
    let platform = PlatformCollector.collect(env).await.unwrap_or_unavailable();
    let locale = LocaleCollector.collect(env).await.unwrap_or_unavailable();
    let storage = StorageCollector.collect(env).await.unwrap_or_unavailable();
    let webgl = if options.webgl {
        WebGlCollector.collect(env).await.unwrap_or_unavailable()
    } else {
        WebGlSignals::default()
    };

    let (canvas, audio, fonts) = tokio::join!(
        optional(options.canvas, CanvasCollector, env),
        optional(options.audio, AudioCollector::new(options.timeout), env),
        optional(options.fonts, FontsCollector, env),
    );

    SignalRecord {
        screen_resolution: screen.screen_resolution,
        color_depth: screen.color_depth,
        pixel_ratio: screen.pixel_ratio,

        timezone: locale.timezone,
        timezone_offset: locale.timezone_offset,
        language: locale.language,
        languages: locale.languages,

        platform: platform.platform,
        user_agent: platform.user_agent,
        vendor: platform.vendor,
        hardware_concurrency: platform.hardware_concurrency,
        device_memory: platform.device_memory,
        max_touch_points: platform.max_touch_points,

        canvas,
        webgl_vendor: webgl.vendor,
        webgl_renderer: webgl.renderer,
        audio_fingerprint: audio,
        fonts_hash: fonts,

        cookies_enabled: platform.cookies_enabled,
        do_not_track: platform.do_not_track,
        session_storage: storage.session_storage,
        local_storage: storage.local_storage,
        indexed_db: storage.indexed_db,

        plugins: platform.plugins,
        mime_types: platform.mime_types,
    }
}

async fn optional<C: Collector>(enabled: bool, collector: C, env: &Environment) -> Option<C::Output> {
    if !enabled {
        debug!(collector = collector.name(), "collector disabled");
        return None;
    }
    collector.collect(env).await.into_option()
}
