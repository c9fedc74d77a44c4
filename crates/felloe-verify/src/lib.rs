//! Checksum verification for downloaded release archives.
//!
//! Bytes are hashed incrementally as they stream to disk, then compared with
//! the digest published next to the archive.
//!
//! ```
//! use felloe_verify::{Hasher, Sha256Hasher, parse_checksum_file};
//!
//! let published = format!("{}  helm.tar.gz\n", Sha256Hasher::digest(b"archive"));
//! let expected = parse_checksum_file(&published, "helm.tar.gz").unwrap();
//!
//! let mut hasher = Sha256Hasher::new();
//! hasher.update(b"arch");
//! hasher.update(b"ive");
//! expected.verify(&hasher.finalize()).unwrap();
//! ```

mod digest;
mod error;
mod hasher;

pub use digest::{Sha256Digest, parse_checksum_file};
pub use error::{Result, VerifyError};
pub use hasher::{Hasher, Sha256Hasher};
