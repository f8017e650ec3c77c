use sha2::{Digest, Sha256};

/// Digest algorithm name recorded alongside identifiers.
pub const ALG_SHA256: &str = "sha256";

/// Failure of the cryptographic digest primitive. There is no degraded
/// fallback for the identifier, so this is fatal to the caller.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("digest primitive {alg} is unavailable on this host")]
    Unavailable { alg: String },
    #[error("digest primitive failed: {0}")]
    Failed(String),
}

/// Compute SHA-256 hash of bytes, returning lowercase hex string.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Non-cryptographic digest for collector-level change detection.
///
/// 32-bit rolling hash (`h * 31 + unit`, wrapping) over the UTF-16 code units
/// of `input`, rendered as the base-36 form of its absolute value. Stable
/// across processes and platforms; no fixed length and no collision
/// guarantee.
pub fn fast_hash(input: &str) -> String {
    let mut h: i32 = 0;
    for unit in input.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    to_base36(h.unsigned_abs())
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(7);
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Source of the cryptographic identifier digest.
///
/// The default is [`Sha256Digester`]; hosts that delegate hashing to a
/// platform primitive implement this and surface its absence as
/// [`DigestError::Unavailable`].
pub trait Digester: Send + Sync {
    fn alg(&self) -> &str;
    fn digest_hex(&self, input: &str) -> Result<String, DigestError>;
}

/// In-process SHA-256. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn alg(&self) -> &str {
        ALG_SHA256
    }

    fn digest_hex(&self, input: &str) -> Result<String, DigestError> {
        Ok(sha256_hex(input.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_empty() {
        let h = sha256_hex(b"");
        assert_eq!(
            h,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_hello() {
        let h = sha256_hex(b"hello");
        assert_eq!(
            h,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn output_is_64_char_lowercase_hex() {
        let h = sha256_hex(b"test");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }

    #[test]
    fn sha256_handles_astral_characters() {
        let a = Sha256Digester.digest_hex("Hello 世界 🌍").unwrap();
        let b = Sha256Digester.digest_hex("Hello 世界 🌎").unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn digester_matches_sha256_hex() {
        let d = Sha256Digester;
        assert_eq!(d.alg(), "sha256");
        assert_eq!(d.digest_hex("").unwrap(), sha256_hex(b""));
    }

    #[test]
    fn fast_hash_empty_is_zero() {
        assert_eq!(fast_hash(""), "0");
    }

    #[test]
    fn fast_hash_known_values() {
        // "a" = 97 -> "2p"; "ab" = 97*31 + 98 = 3105 -> "2e9"
        assert_eq!(fast_hash("a"), "2p");
        assert_eq!(fast_hash("ab"), "2e9");
    }

    #[test]
    fn fast_hash_is_base36_and_stable() {
        let a = fast_hash("test string");
        assert_eq!(a, fast_hash("test string"));
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn fast_hash_distinguishes_similar_inputs() {
        assert_ne!(fast_hash("abc"), fast_hash("abd"));
        assert_ne!(fast_hash("input1"), fast_hash("input2"));
    }

    #[test]
    fn fast_hash_wraps_on_long_input() {
        let long = "a".repeat(10_000);
        let h = fast_hash(&long);
        assert!(!h.is_empty());
        assert!(h.len() <= 7);
    }

    #[test]
    fn fast_hash_handles_unicode() {
        let h = fast_hash("Hello 世界 🌍 émoji");
        assert!(!h.is_empty());
    }

    #[test]
    fn base36_of_max_magnitude() {
        // |i32::MIN| = 2^31
        assert_eq!(to_base36(2_147_483_648), "zik0zk");
    }
}
