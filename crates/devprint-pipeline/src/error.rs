use devprint_core::DigestError;

/// The only way a fingerprinting call fails. Collector failures never
/// surface here; they degrade to unavailable signals instead.
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    #[error("cannot derive device identifier: {0}")]
    Digest(#[from] DigestError),
}
