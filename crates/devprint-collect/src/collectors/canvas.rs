use crate::env::{CanvasOp, Environment, FillStyle};
use crate::error::ProbeError;
use crate::probe::{Collector, Probe};
use devprint_core::hash::fast_hash;
use std::f64::consts::PI;

pub const CANVAS_WIDTH: u32 = 200;
pub const CANVAS_HEIGHT: u32 = 50;

/// Paints a fixed scene on a 2D surface and digests the serialized bitmap.
/// Differences in font rasterization, anti-aliasing and color handling show
/// up in the digest.
pub struct CanvasCollector;

fn color(c: &str) -> CanvasOp {
    CanvasOp::FillStyle(FillStyle::Color(c.to_string()))
}

/// The fixed draw sequence. Order and every constant are part of the
/// fingerprint; changing any of them changes every canvas digest.
pub fn scene() -> Vec<CanvasOp> {
    let w = f64::from(CANVAS_WIDTH);
    let h = f64::from(CANVAS_HEIGHT);
    vec![
        // Background
        color("#f0f0f0"),
        CanvasOp::FillRect { x: 0.0, y: 0.0, w, h },
        // Text
        CanvasOp::TextBaseline("alphabetic".into()),
        color("#069"),
        CanvasOp::Font("14px 'Arial'".into()),
        CanvasOp::FillText {
            text: "Devprint Fingerprint 🔐".into(),
            x: 2.0,
            y: 15.0,
        },
        color("rgba(102, 204, 0, 0.7)"),
        CanvasOp::Font("18px 'Times New Roman'".into()),
        CanvasOp::FillText {
            text: "Canvas Test".into(),
            x: 4.0,
            y: 35.0,
        },
        // Shapes
        CanvasOp::BeginPath,
        CanvasOp::Arc {
            x: 50.0,
            y: 25.0,
            radius: 10.0,
            start: 0.0,
            end: PI * 2.0,
            counter_clockwise: true,
        },
        CanvasOp::ClosePath,
        color("rgba(255, 0, 0, 0.5)"),
        CanvasOp::Fill,
        // Gradient
        CanvasOp::FillStyle(FillStyle::LinearGradient {
            x0: 100.0,
            y0: 0.0,
            x1: 200.0,
            y1: 0.0,
            stops: vec![(0.0, "blue".into()), (1.0, "green".into())],
        }),
        CanvasOp::FillRect {
            x: 100.0,
            y: 10.0,
            w: 75.0,
            h: 30.0,
        },
    ]
}

fn render(env: &Environment) -> Result<Option<String>, ProbeError> {
    let Some(mut ctx) = env.surfaces.context_2d(CANVAS_WIDTH, CANVAS_HEIGHT)? else {
        return Ok(None);
    };
    for op in scene() {
        ctx.apply(op)?;
    }
    let image = ctx.to_data_url("image/png")?;
    Ok(Some(fast_hash(&image)))
}

#[async_trait::async_trait]
impl Collector for CanvasCollector {
    type Output = String;

    fn name(&self) -> &'static str {
        "canvas"
    }

    async fn collect(&self, env: &Environment) -> Probe<String> {
        Probe::from_outcome(self.name(), render(env))
    }
}
