//! Host platform facts: OS and architecture names as release artifacts spell
//! them, per-user directories, `PATH` editing and shell detection.

pub use error::{Error, Result};
pub use platform::Platform;

pub mod arch;
pub mod dir;
pub mod env;
mod error;
pub mod os;
mod platform;
pub mod shell;
