use crate::env::Environment;
use crate::probe::{Collector, Probe};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenSignals {
    /// `"{width}x{height}"`
    pub screen_resolution: String,
    pub color_depth: u32,
    pub pixel_ratio: f64,
}

pub struct ScreenCollector;

#[async_trait::async_trait]
impl Collector for ScreenCollector {
    type Output = ScreenSignals;

    fn name(&self) -> &'static str {
        "screen"
    }

    async fn collect(&self, env: &Environment) -> Probe<ScreenSignals> {
        let outcome = env.host.screen().map(|s| {
            Some(ScreenSignals {
                screen_resolution: format!("{}x{}", s.width, s.height),
                color_depth: s.color_depth,
                // Unreported, zero or NaN all mean a 1:1 display.
                pixel_ratio: s
                    .device_pixel_ratio
                    .filter(|r| *r != 0.0 && !r.is_nan())
                    .unwrap_or(1.0),
            })
        });
        Probe::from_outcome(self.name(), outcome)
    }
}
