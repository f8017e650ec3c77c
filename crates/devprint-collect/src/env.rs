//! Injected access to the host environment.
//!
//! Every collector reads the host only through these capabilities, so a
//! test or a replayed [`HostProfile`](crate::profile::HostProfile) can stand
//! in for a real host without touching process-wide state.

use crate::error::ProbeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ── Host metadata ──

/// Raw screen geometry as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
}

/// Raw navigator-equivalent platform strings. `None` means unreported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorInfo {
    pub platform: Option<String>,
    pub user_agent: String,
    pub vendor: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub max_touch_points: Option<u32>,
    pub cookie_enabled: bool,
    pub do_not_track: Option<String>,
    pub plugins: Option<Vec<String>>,
    pub mime_types: Option<Vec<String>>,
}

/// Raw locale and timezone settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleInfo {
    pub time_zone: Option<String>,
    /// Minutes to add to local time to reach UTC.
    pub timezone_offset: i32,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
}

pub trait HostInfo: Send + Sync {
    fn screen(&self) -> Result<ScreenInfo, ProbeError>;
    fn navigator(&self) -> Result<NavigatorInfo, ProbeError>;
    fn locale(&self) -> Result<LocaleInfo, ProbeError>;
}

// ── Storage ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Ephemeral per-session key-value storage.
    Session,
    /// Persistent key-value storage.
    Local,
    /// Structured on-device database.
    IndexedDb,
}

impl StorageArea {
    pub const ALL: [StorageArea; 3] = [StorageArea::Session, StorageArea::Local, StorageArea::IndexedDb];

    pub fn name(self) -> &'static str {
        match self {
            StorageArea::Session => "sessionStorage",
            StorageArea::Local => "localStorage",
            StorageArea::IndexedDb => "indexedDB",
        }
    }
}

pub trait KeyValueStore: Send {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ProbeError>;
    fn remove_item(&mut self, key: &str) -> Result<(), ProbeError>;
}

pub trait StorageBackend: Send + Sync {
    /// Obtain a handle on `area`. Fails when the area is missing or access
    /// is refused.
    fn open(&self, area: StorageArea) -> Result<Box<dyn KeyValueStore + '_>, ProbeError>;
}

// ── Rendering surfaces ──

#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Color(String),
    LinearGradient {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        /// `(offset, color)` pairs.
        stops: Vec<(f64, String)>,
    },
}

/// One state change or draw call on a 2D surface.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    FillStyle(FillStyle),
    Font(String),
    TextBaseline(String),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    FillText { text: String, x: f64, y: f64 },
    BeginPath,
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        counter_clockwise: bool,
    },
    ClosePath,
    Fill,
}

pub trait Canvas2d: Send {
    fn apply(&mut self, op: CanvasOp) -> Result<(), ProbeError>;
    /// Rendered width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> Result<f64, ProbeError>;
    /// Serialize the bitmap as a data URL of the given MIME type.
    fn to_data_url(&mut self, mime: &str) -> Result<String, ProbeError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlParameter {
    Vendor,
    Renderer,
    UnmaskedVendor,
    UnmaskedRenderer,
}

pub trait GlContext: Send {
    fn has_extension(&mut self, name: &str) -> Result<bool, ProbeError>;
    fn parameter(&mut self, param: GlParameter) -> Result<Option<String>, ProbeError>;
}

pub trait SurfaceProvider: Send + Sync {
    /// A 2D drawing surface of the given size, or `None` if the host has none.
    fn context_2d(&self, width: u32, height: u32) -> Result<Option<Box<dyn Canvas2d + '_>>, ProbeError>;
    /// A 3D context under the given context name, or `None` if unsupported.
    fn context_3d(&self, alias: &str) -> Result<Option<Box<dyn GlContext + '_>>, ProbeError>;
}

// ── Audio ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorSettings {
    pub threshold: f64,
    pub knee: f64,
    pub ratio: f64,
    pub attack: f64,
    pub release: f64,
}

/// oscillator → compressor → analyser → gain → destination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioGraphConfig {
    pub waveform: Waveform,
    pub frequency_hz: f64,
    pub compressor: CompressorSettings,
    pub gain: f64,
}

pub trait AudioGraph: Send {
    fn build(&mut self, config: &AudioGraphConfig) -> Result<(), ProbeError>;
    fn start(&mut self) -> Result<(), ProbeError>;
    /// Current frequency-domain analyser output, in dB per bin.
    fn frequency_data(&mut self) -> Result<Vec<f32>, ProbeError>;
    fn stop(&mut self) -> Result<(), ProbeError>;
    fn close(&mut self) -> Result<(), ProbeError>;
}

pub trait AudioBackend: Send + Sync {
    /// Create an audio context under the given constructor name, or `None`
    /// if the host does not expose it.
    fn create_context(&self, alias: &str) -> Result<Option<Box<dyn AudioGraph + '_>>, ProbeError>;
}

// ── Bundle ──

/// Everything a collector may read. Cheap to clone.
#[derive(Clone)]
pub struct Environment {
    pub host: Arc<dyn HostInfo>,
    pub storage: Arc<dyn StorageBackend>,
    pub surfaces: Arc<dyn SurfaceProvider>,
    pub audio: Arc<dyn AudioBackend>,
}

impl Environment {
    pub fn new(
        host: Arc<dyn HostInfo>,
        storage: Arc<dyn StorageBackend>,
        surfaces: Arc<dyn SurfaceProvider>,
        audio: Arc<dyn AudioBackend>,
    ) -> Self {
        Self {
            host,
            storage,
            surfaces,
            audio,
        }
    }

    /// Use one value for all four capabilities.
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: HostInfo + StorageBackend + SurfaceProvider + AudioBackend + 'static,
    {
        Self {
            host: shared.clone(),
            storage: shared.clone(),
            surfaces: shared.clone(),
            audio: shared,
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}
