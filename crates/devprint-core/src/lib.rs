pub mod canon;
pub mod hash;
pub mod options;
pub mod types;

pub use hash::{DigestError, Digester, Sha256Digester};
pub use options::{FingerprintOptions, ResolvedOptions};
pub use types::*;
