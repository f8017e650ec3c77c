use crate::env::{CanvasOp, Environment};
use crate::error::ProbeError;
use crate::probe::{Collector, Probe};
use devprint_core::hash::fast_hash;

/// Candidate fonts, in the order detected names are joined.
pub const CANDIDATE_FONTS: [&str; 22] = [
    "Arial",
    "Arial Black",
    "Comic Sans MS",
    "Courier New",
    "Georgia",
    "Impact",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
    "Helvetica",
    "Monaco",
    "Menlo",
    "Consolas",
    "Lucida Console",
    "Tahoma",
    "Palatino",
    "Century Gothic",
    "Bookman Old Style",
    "Garamond",
    "MS Gothic",
    "MS PGothic",
    "MS Mincho",
];

pub const BASE_FONTS: [&str; 3] = ["monospace", "sans-serif", "serif"];

pub const TEST_STRING: &str = "mmmmmmmmmmlli";
pub const TEST_SIZE: &str = "72px";

/// Size of the scratch surface used for text measurement.
const PROBE_SURFACE: (u32, u32) = (300, 150);

/// Detects installed fonts by comparing rendered text widths against the
/// generic families they fall back to.
pub struct FontsCollector;

/// Names of candidate fonts whose measured width differs from the baseline
/// of at least one fallback family.
pub fn detect_fonts(env: &Environment) -> Result<Option<Vec<&'static str>>, ProbeError> {
    let Some(mut ctx) = env.surfaces.context_2d(PROBE_SURFACE.0, PROBE_SURFACE.1)? else {
        return Ok(None);
    };

    let mut baselines = [0.0; BASE_FONTS.len()];
    for (base, width) in BASE_FONTS.iter().zip(baselines.iter_mut()) {
        ctx.apply(CanvasOp::Font(format!("{TEST_SIZE} {base}")))?;
        *width = ctx.measure_text(TEST_STRING)?;
    }

    let mut detected = Vec::new();
    for font in CANDIDATE_FONTS {
        for (base, baseline) in BASE_FONTS.iter().zip(baselines) {
            ctx.apply(CanvasOp::Font(format!("{TEST_SIZE} '{font}', {base}")))?;
            if ctx.measure_text(TEST_STRING)? != baseline {
                detected.push(font);
                break;
            }
        }
    }
    Ok(Some(detected))
}

#[async_trait::async_trait]
impl Collector for FontsCollector {
    type Output = String;

    fn name(&self) -> &'static str {
        "fonts"
    }

    async fn collect(&self, env: &Environment) -> Probe<String> {
        let outcome = detect_fonts(env).map(|fonts| fonts.map(|names| fast_hash(&names.join(","))));
        Probe::from_outcome(self.name(), outcome)
    }
}
