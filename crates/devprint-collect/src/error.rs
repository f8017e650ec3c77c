/// Failure raised by an environment capability. Collectors catch every
/// `ProbeError` and degrade to their unavailable value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProbeError {
    #[error("{0} is not supported by this host")]
    Unsupported(String),
    #[error("access to {0} was denied")]
    SecurityDenied(String),
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("driver error: {0}")]
    Driver(String),
}
