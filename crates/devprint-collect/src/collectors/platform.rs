use crate::env::Environment;
use crate::probe::{Collector, Probe};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSignals {
    pub platform: String,
    pub user_agent: String,
    pub vendor: String,
    pub hardware_concurrency: u32,
    /// GiB; `None` when the host does not report it.
    pub device_memory: Option<f64>,
    pub max_touch_points: u32,
    pub cookies_enabled: bool,
    pub do_not_track: Option<String>,
    pub plugins: Vec<String>,
    pub mime_types: Vec<String>,
}

pub struct PlatformCollector;

/// Empty strings count as unreported.
fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

#[async_trait::async_trait]
impl Collector for PlatformCollector {
    type Output = PlatformSignals;

    fn name(&self) -> &'static str {
        "platform"
    }

    async fn collect(&self, env: &Environment) -> Probe<PlatformSignals> {
        let outcome = env.host.navigator().map(|nav| {
            Some(PlatformSignals {
                platform: non_empty(nav.platform).unwrap_or_else(|| "unknown".to_string()),
                user_agent: nav.user_agent,
                vendor: nav.vendor.unwrap_or_default(),
                hardware_concurrency: nav.hardware_concurrency.unwrap_or(0),
                device_memory: nav.device_memory,
                max_touch_points: nav.max_touch_points.unwrap_or(0),
                cookies_enabled: nav.cookie_enabled,
                do_not_track: non_empty(nav.do_not_track),
                plugins: nav.plugins.unwrap_or_default(),
                mime_types: nav.mime_types.unwrap_or_default(),
            })
        });
        Probe::from_outcome(self.name(), outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::fixtures::desktop;
    use crate::env::NavigatorInfo;
    use crate::profile::HostProfile;

    #[tokio::test]
    async fn reads_reported_values() {
        let env = desktop().into_environment();
        let p = PlatformCollector.collect(&env).await.into_option().unwrap();
        assert_eq!(p.platform, "MacIntel");
        assert_eq!(p.hardware_concurrency, 8);
        assert_eq!(p.device_memory, Some(16.0));
        assert_eq!(p.do_not_track.as_deref(), Some("1"));
        assert_eq!(p.plugins, vec!["PDF Viewer".to_string()]);
        assert!(p.cookies_enabled);
    }

    #[tokio::test]
    async fn applies_defaults_for_unreported_fields() {
        let env = HostProfile {
            navigator: Some(NavigatorInfo {
                platform: Some(String::new()),
                user_agent: "UA".into(),
                ..Default::default()
            }),
            ..Default::default()
        }
        .into_environment();
        let p = PlatformCollector.collect(&env).await.into_option().unwrap();
        assert_eq!(p.platform, "unknown");
        assert_eq!(p.vendor, "");
        assert_eq!(p.hardware_concurrency, 0);
        assert_eq!(p.device_memory, None);
        assert_eq!(p.max_touch_points, 0);
        assert_eq!(p.do_not_track, None);
        assert!(p.plugins.is_empty());
        assert!(p.mime_types.is_empty());
    }

    #[tokio::test]
    async fn zero_device_memory_is_kept() {
        let env = HostProfile {
            navigator: Some(NavigatorInfo {
                device_memory: Some(0.0),
                ..Default::default()
            }),
            ..Default::default()
        }
        .into_environment();
        let p = PlatformCollector.collect(&env).await.into_option().unwrap();
        assert_eq!(p.device_memory, Some(0.0));
    }

    #[tokio::test]
    async fn unavailable_navigator_yields_empty_record() {
        let env = HostProfile::default().into_environment();
        let p = PlatformCollector.collect(&env).await.unwrap_or_unavailable();
        assert_eq!(p.platform, "");
        assert_eq!(p.device_memory, None);
        assert!(!p.cookies_enabled);
    }
}
