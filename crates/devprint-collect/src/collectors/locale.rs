use crate::env::Environment;
use crate::probe::{Collector, Probe};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSignals {
    /// IANA zone name.
    pub timezone: String,
    pub timezone_offset: i32,
    pub language: String,
    pub languages: Vec<String>,
}

pub struct LocaleCollector;

#[async_trait::async_trait]
impl Collector for LocaleCollector {
    type Output = LocaleSignals;

    fn name(&self) -> &'static str {
        "locale"
    }

    async fn collect(&self, env: &Environment) -> Probe<LocaleSignals> {
        let outcome = env.host.locale().map(|loc| {
            let language = loc
                .language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "unknown".to_string());
            // Built from the resolved language, so an unreported one yields ["unknown"].
            let languages = loc.languages.unwrap_or_else(|| vec![language.clone()]);
            Some(LocaleSignals {
                timezone: loc
                    .time_zone
                    .filter(|tz| !tz.is_empty())
                    .unwrap_or_else(|| "unknown".to_string()),
                timezone_offset: loc.timezone_offset,
                language,
                languages,
            })
        });
        Probe::from_outcome(self.name(), outcome)
    }
}
