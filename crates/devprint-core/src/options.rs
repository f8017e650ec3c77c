use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default requested wait for the audio collector.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Caller-supplied partial configuration. Unset fields take the defaults
/// from [`ResolvedOptions::default`]; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintOptions {
    /// Include the 2D-surface digest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<bool>,
    /// Include GPU vendor/renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<bool>,
    /// Include the audio digest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    /// Include the font-probe digest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<bool>,
    /// Requested audio wait in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

/// Fully resolved configuration for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub canvas: bool,
    pub webgl: bool,
    pub audio: bool,
    pub fonts: bool,
    pub timeout: Duration,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            canvas: true,
            webgl: true,
            audio: true,
            fonts: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl FingerprintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(mut self, enabled: bool) -> Self {
        self.canvas = Some(enabled);
        self
    }

    pub fn webgl(mut self, enabled: bool) -> Self {
        self.webgl = Some(enabled);
        self
    }

    pub fn audio(mut self, enabled: bool) -> Self {
        self.audio = Some(enabled);
        self
    }

    pub fn fonts(mut self, enabled: bool) -> Self {
        self.fonts = Some(enabled);
        self
    }

    pub fn timeout_ms(mut self, ms: f64) -> Self {
        self.timeout = Some(ms);
        self
    }

    /// Disable all four optional collectors.
    pub fn minimal() -> Self {
        Self::new().canvas(false).webgl(false).audio(false).fonts(false)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: &FingerprintOptions) -> Self {
        Self {
            canvas: other.canvas.or(self.canvas),
            webgl: other.webgl.or(self.webgl),
            audio: other.audio.or(self.audio),
            fonts: other.fonts.or(self.fonts),
            timeout: other.timeout.or(self.timeout),
        }
    }

    /// Lenient reader: accepts any JSON shape and never fails.
    ///
    /// Non-objects yield no overrides. `null` means unset. Flags given a
    /// non-boolean take its truthiness; a non-numeric `timeout` is unset.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let flag = |key: &str| obj.get(key).and_then(truthiness);
        Self {
            canvas: flag("canvas"),
            webgl: flag("webgl"),
            audio: flag("audio"),
            fonts: flag("fonts"),
            timeout: obj.get("timeout").and_then(Value::as_f64),
        }
    }

    pub fn resolve(&self) -> ResolvedOptions {
        let defaults = ResolvedOptions::default();
        ResolvedOptions {
            canvas: self.canvas.unwrap_or(defaults.canvas),
            webgl: self.webgl.unwrap_or(defaults.webgl),
            audio: self.audio.unwrap_or(defaults.audio),
            fonts: self.fonts.unwrap_or(defaults.fonts),
            timeout: self.timeout.map_or(defaults.timeout, millis_to_duration),
        }
    }
}

fn truthiness(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan())),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

/// Negative and non-finite requests become zero; values too large for a
/// `Duration` saturate.
fn millis_to_duration(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
