//! Version model: concrete release [`Version`]s, [`Partial`] prefixes and the
//! [`VersionRequest`]s users type on the command line.

mod error;
mod partial;
mod request;
mod version;

pub use error::{Result, VersionError};
pub use partial::Partial;
pub use request::VersionRequest;
pub use version::Version;
