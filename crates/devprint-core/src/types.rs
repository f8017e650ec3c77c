use serde::{Deserialize, Serialize};

/// Version tag of the fingerprinting algorithm carried by every result.
pub const ALGORITHM_VERSION: &str = "1.0.0";

/// Separator between Identity Subset values in the canonical identity string.
pub const IDENTITY_SEPARATOR: char = '|';

/// Flat record of every signal observed on the host.
///
/// `None`, `""`, `0`, `false` and empty lists all mean "could not be
/// determined" for their field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    // Display
    pub screen_resolution: String,
    pub color_depth: u32,
    pub pixel_ratio: f64,

    // Locale
    pub timezone: String,
    pub timezone_offset: i32,
    pub language: String,
    pub languages: Vec<String>,

    // Platform
    pub platform: String,
    pub user_agent: String,
    pub vendor: String,
    pub hardware_concurrency: u32,
    pub device_memory: Option<f64>,
    pub max_touch_points: u32,

    // Rendering
    pub canvas: Option<String>,
    pub webgl_vendor: Option<String>,
    pub webgl_renderer: Option<String>,

    pub audio_fingerprint: Option<String>,
    pub fonts_hash: Option<String>,

    // Browser features
    pub cookies_enabled: bool,
    pub do_not_track: Option<String>,
    pub session_storage: bool,
    pub local_storage: bool,
    #[serde(rename = "indexedDB")]
    pub indexed_db: bool,

    pub plugins: Vec<String>,
    pub mime_types: Vec<String>,
}

/// Snapshot produced by one fingerprinting call. Never mutated after
/// construction; the system keeps no history of past results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintResult {
    /// Stable device identifier: 64 lowercase hex chars.
    pub device_id: String,
    /// Completeness ratio in `[0, 1]`.
    pub confidence: f64,
    pub signals: SignalRecord,
    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub version: String,
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_camel_case_with_nulls() {
        let record = SignalRecord::default();
        let val = serde_json::to_value(&record).unwrap();
        let obj = val.as_object().unwrap();
        assert!(obj.contains_key("screenResolution"));
        assert!(obj.contains_key("hardwareConcurrency"));
        assert!(obj.contains_key("indexedDB"));
        assert!(obj.contains_key("mimeTypes"));
        assert!(obj["canvas"].is_null());
        assert!(obj["deviceMemory"].is_null());
        assert_eq!(obj.len(), 25);
    }

    #[test]
    fn result_serializes_device_id() {
        let result = FingerprintResult {
            device_id: "ab".repeat(32),
            confidence: 0.5,
            signals: SignalRecord::default(),
            timestamp: 1,
            version: ALGORITHM_VERSION.to_string(),
        };
        let val = serde_json::to_value(&result).unwrap();
        assert_eq!(val["deviceId"], "ab".repeat(32));
        assert_eq!(val["version"], "1.0.0");
    }

    #[test]
    fn now_millis_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }
}
