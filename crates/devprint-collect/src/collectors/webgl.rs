use crate::env::{Environment, GlContext, GlParameter};
use crate::error::ProbeError;
use crate::probe::{Collector, Probe};
use serde::Serialize;

/// Context names tried in order.
pub const CONTEXT_ALIASES: [&str; 2] = ["webgl", "experimental-webgl"];

/// Extension exposing the unmasked vendor/renderer strings.
pub const DEBUG_RENDERER_INFO: &str = "WEBGL_debug_renderer_info";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebGlSignals {
    pub vendor: Option<String>,
    pub renderer: Option<String>,
}

/// Reads GPU vendor/renderer strings from a 3D context.
pub struct WebGlCollector;

fn read(ctx: &mut dyn GlContext) -> Result<WebGlSignals, ProbeError> {
    let (vendor, renderer) = if ctx.has_extension(DEBUG_RENDERER_INFO)? {
        (GlParameter::UnmaskedVendor, GlParameter::UnmaskedRenderer)
    } else {
        (GlParameter::Vendor, GlParameter::Renderer)
    };
    Ok(WebGlSignals {
        vendor: ctx.parameter(vendor)?,
        renderer: ctx.parameter(renderer)?,
    })
}

fn query(env: &Environment) -> Result<Option<WebGlSignals>, ProbeError> {
    for alias in CONTEXT_ALIASES {
        if let Some(mut ctx) = env.surfaces.context_3d(alias)? {
            return read(ctx.as_mut()).map(Some);
        }
    }
    Ok(None)
}

#[async_trait::async_trait]
impl Collector for WebGlCollector {
    type Output = WebGlSignals;

    fn name(&self) -> &'static str {
        "webgl"
    }

    async fn collect(&self, env: &Environment) -> Probe<WebGlSignals> {
        Probe::from_outcome(self.name(), query(env))
    }
}
