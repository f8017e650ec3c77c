use crate::types::{SignalRecord, IDENTITY_SEPARATOR};

/// A signal field that participates in identity or confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalField {
    ScreenResolution,
    ColorDepth,
    PixelRatio,
    Timezone,
    Language,
    Platform,
    UserAgent,
    HardwareConcurrency,
    DeviceMemory,
    Canvas,
    WebglVendor,
    WebglRenderer,
    AudioFingerprint,
    FontsHash,
}

/// Fields that feed the device identifier, in canonicalization order.
pub const IDENTITY_SUBSET: [SignalField; 12] = [
    SignalField::ScreenResolution,
    SignalField::ColorDepth,
    SignalField::PixelRatio,
    SignalField::Timezone,
    SignalField::Platform,
    SignalField::HardwareConcurrency,
    SignalField::DeviceMemory,
    SignalField::Canvas,
    SignalField::WebglVendor,
    SignalField::WebglRenderer,
    SignalField::AudioFingerprint,
    SignalField::FontsHash,
];

/// Fields counted for confidence. Declared on its own; it overlaps
/// [`IDENTITY_SUBSET`] but is not derived from it.
pub const CONFIDENCE_FIELDS: [SignalField; 12] = [
    SignalField::Canvas,
    SignalField::WebglVendor,
    SignalField::WebglRenderer,
    SignalField::AudioFingerprint,
    SignalField::FontsHash,
    SignalField::ScreenResolution,
    SignalField::ColorDepth,
    SignalField::Platform,
    SignalField::HardwareConcurrency,
    SignalField::Timezone,
    SignalField::Language,
    SignalField::UserAgent,
];

/// A field value viewed for truthiness and string coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Absent,
}

impl SignalValue<'_> {
    /// Collected: non-empty text, non-zero number, not absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            SignalValue::Text(s) => !s.is_empty(),
            SignalValue::Int(n) => *n != 0,
            SignalValue::Float(f) => *f != 0.0 && !f.is_nan(),
            SignalValue::Absent => false,
        }
    }

    /// String form used in the canonical identity string; `None` when falsy.
    pub fn coerce(&self) -> Option<String> {
        if !self.is_truthy() {
            return None;
        }
        match self {
            SignalValue::Text(s) => Some((*s).to_string()),
            SignalValue::Int(n) => Some(n.to_string()),
            SignalValue::Float(f) => Some(format_number(*f)),
            SignalValue::Absent => None,
        }
    }
}

impl SignalField {
    /// Record key as serialized.
    pub fn name(self) -> &'static str {
        match self {
            SignalField::ScreenResolution => "screenResolution",
            SignalField::ColorDepth => "colorDepth",
            SignalField::PixelRatio => "pixelRatio",
            SignalField::Timezone => "timezone",
            SignalField::Language => "language",
            SignalField::Platform => "platform",
            SignalField::UserAgent => "userAgent",
            SignalField::HardwareConcurrency => "hardwareConcurrency",
            SignalField::DeviceMemory => "deviceMemory",
            SignalField::Canvas => "canvas",
            SignalField::WebglVendor => "webglVendor",
            SignalField::WebglRenderer => "webglRenderer",
            SignalField::AudioFingerprint => "audioFingerprint",
            SignalField::FontsHash => "fontsHash",
        }
    }

    pub fn read(self, record: &SignalRecord) -> SignalValue<'_> {
        fn opt(s: &Option<String>) -> SignalValue<'_> {
            s.as_deref().map_or(SignalValue::Absent, SignalValue::Text)
        }
        match self {
            SignalField::ScreenResolution => SignalValue::Text(&record.screen_resolution),
            SignalField::ColorDepth => SignalValue::Int(i64::from(record.color_depth)),
            SignalField::PixelRatio => SignalValue::Float(record.pixel_ratio),
            SignalField::Timezone => SignalValue::Text(&record.timezone),
            SignalField::Language => SignalValue::Text(&record.language),
            SignalField::Platform => SignalValue::Text(&record.platform),
            SignalField::UserAgent => SignalValue::Text(&record.user_agent),
            SignalField::HardwareConcurrency => {
                SignalValue::Int(i64::from(record.hardware_concurrency))
            }
            SignalField::DeviceMemory => record
                .device_memory
                .map_or(SignalValue::Absent, SignalValue::Float),
            SignalField::Canvas => opt(&record.canvas),
            SignalField::WebglVendor => opt(&record.webgl_vendor),
            SignalField::WebglRenderer => opt(&record.webgl_renderer),
            SignalField::AudioFingerprint => opt(&record.audio_fingerprint),
            SignalField::FontsHash => opt(&record.fonts_hash),
        }
    }
}

/// Build the canonical identity string: Identity Subset values in fixed
/// order, falsy entries dropped (no placeholder), joined by `|`.
pub fn canonical_identity_string(record: &SignalRecord) -> String {
    let sep = IDENTITY_SEPARATOR.to_string();
    IDENTITY_SUBSET
        .iter()
        .filter_map(|field| field.read(record).coerce())
        .collect::<Vec<_>>()
        .join(&sep)
}

/// Share of [`CONFIDENCE_FIELDS`] that were collected.
pub fn confidence(record: &SignalRecord) -> f64 {
    let collected = CONFIDENCE_FIELDS
        .iter()
        .filter(|field| field.read(record).is_truthy())
        .count();
    collected as f64 / CONFIDENCE_FIELDS.len() as f64
}

/// Render a number the way a JavaScript host stringifies it: integral values
/// without a fraction, `NaN`, `Infinity`, `-Infinity`, and `0` for `-0`.
/// Magnitudes below `1e-6` or from `1e21` up use exponent form (`1e-7`,
/// `1.5e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let s = if value > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        exponent_form(value).unwrap_or_else(|| value.to_string())
    }
}

/// Shortest round-trip digits in exponent form, when the decimal exponent
/// falls outside `[-7, 21)`.
fn exponent_form(value: f64) -> Option<String> {
    let sci = format!("{value:e}");
    let (mantissa, exp) = sci.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;
    if (-6..21).contains(&exp) {
        return None;
    }
    let sign = if exp >= 0 { "+" } else { "" };
    Some(format!("{mantissa}e{sign}{exp}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignalRecord {
        SignalRecord {
            screen_resolution: "1920x1080".into(),
            color_depth: 24,
            pixel_ratio: 2.0,
            timezone: "America/New_York".into(),
            language: "en-US".into(),
            platform: "MacIntel".into(),
            user_agent: "Mozilla/5.0".into(),
            hardware_concurrency: 8,
            device_memory: Some(16.0),
            canvas: Some("c1".into()),
            webgl_vendor: Some("Apple".into()),
            webgl_renderer: Some("M1".into()),
            audio_fingerprint: Some("a1".into()),
            fonts_hash: Some("f1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn identity_string_follows_subset_order() {
        assert_eq!(
            canonical_identity_string(&sample()),
            "1920x1080|24|2|America/New_York|MacIntel|8|16|c1|Apple|M1|a1|f1"
        );
    }

    #[test]
    fn falsy_entries_are_dropped() {
        let mut r = sample();
        r.canvas = None;
        r.color_depth = 0;
        r.webgl_vendor = Some(String::new());
        assert_eq!(
            canonical_identity_string(&r),
            "1920x1080|2|America/New_York|MacIntel|8|16|M1|a1|f1"
        );
    }

    #[test]
    fn empty_record_yields_empty_string() {
        assert_eq!(canonical_identity_string(&SignalRecord::default()), "");
    }

    #[test]
    fn fields_outside_subset_do_not_affect_identity() {
        let a = sample();
        let mut b = sample();
        b.user_agent = "curl/8.0".into();
        b.language = "fr-FR".into();
        b.plugins = vec!["PDF Viewer".into()];
        assert_eq!(canonical_identity_string(&a), canonical_identity_string(&b));
    }

    #[test]
    fn identity_fields_are_sensitive() {
        let a = sample();
        let mut b = sample();
        b.screen_resolution = "2560x1440".into();
        assert_ne!(canonical_identity_string(&a), canonical_identity_string(&b));
    }

    #[test]
    fn positional_drop_can_collide() {
        // Documented behavior: an empty field leaves no trace of its position.
        let a = SignalRecord {
            timezone: "X".into(),
            ..Default::default()
        };
        let b = SignalRecord {
            platform: "X".into(),
            ..Default::default()
        };
        assert_eq!(canonical_identity_string(&a), canonical_identity_string(&b));
    }

    #[test]
    fn full_record_has_full_confidence() {
        assert_eq!(confidence(&sample()), 1.0);
    }

    #[test]
    fn confidence_counts_language_and_user_agent() {
        let mut r = sample();
        r.language.clear();
        r.user_agent.clear();
        assert!((confidence(&r) - 10.0 / 12.0).abs() < 1e-12);
        // Neither field is part of identity.
        assert_eq!(canonical_identity_string(&r), canonical_identity_string(&sample()));
    }

    #[test]
    fn confidence_ignores_device_memory_and_pixel_ratio() {
        let mut r = sample();
        r.device_memory = None;
        r.pixel_ratio = 0.0;
        assert_eq!(confidence(&r), 1.0);
    }

    #[test]
    fn empty_record_has_zero_confidence() {
        assert_eq!(confidence(&SignalRecord::default()), 0.0);
    }

    #[test]
    fn lists_are_declared_independently() {
        assert!(IDENTITY_SUBSET.contains(&SignalField::DeviceMemory));
        assert!(!CONFIDENCE_FIELDS.contains(&SignalField::DeviceMemory));
        assert!(CONFIDENCE_FIELDS.contains(&SignalField::UserAgent));
        assert!(!IDENTITY_SUBSET.contains(&SignalField::UserAgent));
    }

    #[test]
    fn numbers_format_like_js() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-100.0), "-100");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(-2.5e-10), "-2.5e-10");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(f64::MAX), "1.7976931348623157e+308");
    }

    #[test]
    fn boundary_magnitudes_stay_decimal() {
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.0000015), "0.0000015");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(123456.789), "123456.789");
    }

    #[test]
    fn nan_pixel_ratio_is_falsy() {
        assert!(!SignalValue::Float(f64::NAN).is_truthy());
        assert_eq!(SignalValue::Float(f64::NAN).coerce(), None);
    }

    #[test]
    fn field_names_match_record_keys() {
        let val = serde_json::to_value(sample()).unwrap();
        for field in IDENTITY_SUBSET.iter().chain(CONFIDENCE_FIELDS.iter()) {
            assert!(val.get(field.name()).is_some(), "{}", field.name());
        }
    }
}
