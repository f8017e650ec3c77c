//! Recorded host environments.
//!
//! A [`HostProfile`] describes what a host reports (screen, navigator,
//! locale, storage, rendering and audio behavior) and implements every
//! capability trait in [`crate::env`], so it can be loaded from JSON or YAML
//! and fingerprinted as if it were a live host. Missing sections mean the
//! capability is unavailable; `fault` fields make the capability throw.

use crate::env::{
    AudioBackend, AudioGraph, AudioGraphConfig, Canvas2d, CanvasOp, Environment, GlContext,
    GlParameter, HostInfo, KeyValueStore, LocaleInfo, NavigatorInfo, ScreenInfo, StorageArea,
    StorageBackend, SurfaceProvider,
};
use crate::error::ProbeError;
use devprint_core::hash::fast_hash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON profile: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML profile: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostProfile {
    pub screen: Option<ScreenInfo>,
    pub navigator: Option<NavigatorInfo>,
    pub locale: Option<LocaleInfo>,
    pub storage: StorageProfile,
    pub canvas: Option<CanvasProfile>,
    pub webgl: Option<WebGlProfile>,
    pub audio: Option<AudioProfile>,
}

/// How an area responds to a write/delete probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageAccess {
    Available,
    /// Opening the area throws a security error.
    Denied,
    /// The area opens but writes fail.
    QuotaExceeded,
    #[default]
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageProfile {
    pub session: StorageAccess,
    pub local: StorageAccess,
    pub indexed_db: StorageAccess,
}

impl StorageProfile {
    pub fn all(access: StorageAccess) -> Self {
        Self {
            session: access,
            local: access,
            indexed_db: access,
        }
    }

    fn access(&self, area: StorageArea) -> StorageAccess {
        match area {
            StorageArea::Session => self.session,
            StorageArea::Local => self.local,
            StorageArea::IndexedDb => self.indexed_db,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasProfile {
    /// Fixed serialized bitmap. When absent the URL is derived from the
    /// draw calls actually issued.
    pub data_url: Option<String>,
    /// Width reported for fonts resolving to a generic family, keyed by
    /// family name (`monospace`, `sans-serif`, `serif`).
    pub base_widths: BTreeMap<String, f64>,
    /// Width reported for installed named fonts.
    pub font_widths: BTreeMap<String, f64>,
    pub fault: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebGlProfile {
    /// Context names the host answers to.
    pub aliases: Vec<String>,
    pub vendor: Option<String>,
    pub renderer: Option<String>,
    /// Present when the debug-renderer-info extension is exposed.
    pub debug_info: Option<UnmaskedInfo>,
    pub fault: Option<String>,
}

impl Default for WebGlProfile {
    fn default() -> Self {
        Self {
            aliases: vec!["webgl".to_string()],
            vendor: None,
            renderer: None,
            debug_info: None,
            fault: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnmaskedInfo {
    pub vendor: Option<String>,
    pub renderer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioProfile {
    /// Constructor names the host exposes.
    pub aliases: Vec<String>,
    pub frequency_data: Vec<f32>,
    pub fault: Option<String>,
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self {
            aliases: vec!["AudioContext".to_string()],
            frequency_data: Vec::new(),
            fault: None,
        }
    }
}

impl HostProfile {
    pub fn from_json_str(s: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ProfileError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a profile file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn into_environment(self) -> Environment {
        Environment::from_shared(Arc::new(self))
    }
}

fn fault(fault: &Option<String>) -> Result<(), ProbeError> {
    match fault {
        Some(msg) => Err(ProbeError::Driver(msg.clone())),
        None => Ok(()),
    }
}

// ── HostInfo ──

impl HostInfo for HostProfile {
    fn screen(&self) -> Result<ScreenInfo, ProbeError> {
        self.screen
            .clone()
            .ok_or_else(|| ProbeError::Unsupported("screen".into()))
    }

    fn navigator(&self) -> Result<NavigatorInfo, ProbeError> {
        self.navigator
            .clone()
            .ok_or_else(|| ProbeError::Unsupported("navigator".into()))
    }

    fn locale(&self) -> Result<LocaleInfo, ProbeError> {
        self.locale
            .clone()
            .ok_or_else(|| ProbeError::Unsupported("locale".into()))
    }
}

// ── Storage ──

struct ProfileStore {
    access: StorageAccess,
    items: BTreeMap<String, String>,
}

impl KeyValueStore for ProfileStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ProbeError> {
        if self.access == StorageAccess::QuotaExceeded {
            return Err(ProbeError::QuotaExceeded);
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), ProbeError> {
        self.items.remove(key);
        Ok(())
    }
}

impl StorageBackend for HostProfile {
    fn open(&self, area: StorageArea) -> Result<Box<dyn KeyValueStore + '_>, ProbeError> {
        match self.storage.access(area) {
            StorageAccess::Missing => Err(ProbeError::Unsupported(area.name().into())),
            StorageAccess::Denied => Err(ProbeError::SecurityDenied(area.name().into())),
            access => Ok(Box::new(ProfileStore {
                access,
                items: BTreeMap::new(),
            })),
        }
    }
}

// ── Surfaces ──

struct ProfileCanvas<'a> {
    profile: &'a CanvasProfile,
    width: u32,
    height: u32,
    font: String,
    ops: Vec<CanvasOp>,
}

impl ProfileCanvas<'_> {
    /// Width of the current font: an installed named font wins, otherwise
    /// the longest matching generic-family suffix.
    fn current_width(&self) -> f64 {
        for (name, width) in &self.profile.font_widths {
            if self.font.contains(&format!("'{name}'")) {
                return *width;
            }
        }
        self.profile
            .base_widths
            .iter()
            .filter(|(family, _)| self.font.ends_with(family.as_str()))
            .max_by_key(|(family, _)| family.len())
            .map_or(100.0, |(_, width)| *width)
    }
}

impl Canvas2d for ProfileCanvas<'_> {
    fn apply(&mut self, op: CanvasOp) -> Result<(), ProbeError> {
        fault(&self.profile.fault)?;
        if let CanvasOp::Font(font) = &op {
            self.font = font.clone();
        }
        self.ops.push(op);
        Ok(())
    }

    fn measure_text(&mut self, _text: &str) -> Result<f64, ProbeError> {
        fault(&self.profile.fault)?;
        Ok(self.current_width())
    }

    fn to_data_url(&mut self, mime: &str) -> Result<String, ProbeError> {
        fault(&self.profile.fault)?;
        if let Some(url) = &self.profile.data_url {
            return Ok(url.clone());
        }
        let rendered = format!("{}x{}:{:?}", self.width, self.height, self.ops);
        Ok(format!("data:{mime};base64,{}", fast_hash(&rendered)))
    }
}

struct ProfileGl<'a> {
    profile: &'a WebGlProfile,
}

impl GlContext for ProfileGl<'_> {
    fn has_extension(&mut self, name: &str) -> Result<bool, ProbeError> {
        fault(&self.profile.fault)?;
        Ok(name == crate::collectors::webgl::DEBUG_RENDERER_INFO && self.profile.debug_info.is_some())
    }

    fn parameter(&mut self, param: GlParameter) -> Result<Option<String>, ProbeError> {
        fault(&self.profile.fault)?;
        let unmasked = self.profile.debug_info.as_ref();
        Ok(match param {
            GlParameter::Vendor => self.profile.vendor.clone(),
            GlParameter::Renderer => self.profile.renderer.clone(),
            GlParameter::UnmaskedVendor => unmasked.and_then(|u| u.vendor.clone()),
            GlParameter::UnmaskedRenderer => unmasked.and_then(|u| u.renderer.clone()),
        })
    }
}

impl SurfaceProvider for HostProfile {
    fn context_2d(&self, width: u32, height: u32) -> Result<Option<Box<dyn Canvas2d + '_>>, ProbeError> {
        let Some(profile) = &self.canvas else {
            return Ok(None);
        };
        Ok(Some(Box::new(ProfileCanvas {
            profile,
            width,
            height,
            font: "10px sans-serif".to_string(),
            ops: Vec::new(),
        })))
    }

    fn context_3d(&self, alias: &str) -> Result<Option<Box<dyn GlContext + '_>>, ProbeError> {
        let Some(profile) = &self.webgl else {
            return Ok(None);
        };
        if !profile.aliases.iter().any(|a| a == alias) {
            return Ok(None);
        }
        Ok(Some(Box::new(ProfileGl { profile })))
    }
}

// ── Audio ──

#[derive(Debug, PartialEq, Eq)]
enum GraphState {
    Created,
    Built,
    Running,
    Stopped,
    Closed,
}

struct ProfileAudioGraph<'a> {
    profile: &'a AudioProfile,
    state: GraphState,
}

impl AudioGraph for ProfileAudioGraph<'_> {
    fn build(&mut self, _config: &AudioGraphConfig) -> Result<(), ProbeError> {
        fault(&self.profile.fault)?;
        self.state = GraphState::Built;
        Ok(())
    }

    fn start(&mut self) -> Result<(), ProbeError> {
        if self.state != GraphState::Built {
            return Err(ProbeError::Driver("oscillator started before graph was built".into()));
        }
        self.state = GraphState::Running;
        Ok(())
    }

    fn frequency_data(&mut self) -> Result<Vec<f32>, ProbeError> {
        if self.state != GraphState::Running {
            return Err(ProbeError::Driver("analyser read on idle graph".into()));
        }
        Ok(self.profile.frequency_data.clone())
    }

    fn stop(&mut self) -> Result<(), ProbeError> {
        if self.state == GraphState::Running {
            self.state = GraphState::Stopped;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), ProbeError> {
        self.state = GraphState::Closed;
        Ok(())
    }
}

impl AudioBackend for HostProfile {
    fn create_context(&self, alias: &str) -> Result<Option<Box<dyn AudioGraph + '_>>, ProbeError> {
        let Some(profile) = &self.audio else {
            return Ok(None);
        };
        if !profile.aliases.iter().any(|a| a == alias) {
            return Ok(None);
        }
        Ok(Some(Box::new(ProfileAudioGraph {
            profile,
            state: GraphState::Created,
        })))
    }
}
