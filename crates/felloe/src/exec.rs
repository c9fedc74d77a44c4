//! Running a specific installed helm, or another command next to it.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitStatus};

use felloe_platform::env::PathModifier;

use crate::error::{Error, Result};

/// Runs `binary` with `args`, inheriting stdio.
pub fn run(binary: &Path, args: &[OsString]) -> Result<ExitStatus> {
    tracing::debug!(binary = %binary.display(), ?args, "running");
    Command::new(binary)
        .args(args)
        .status()
        .map_err(|e| Error::io(format!("failed to run {}", binary.display()), e))
}

/// Runs `program` with `dir` first on `PATH`, so any `helm` it invokes is the
/// one in `dir`.
pub fn exec(dir: &Path, program: &OsStr, args: &[OsString]) -> Result<ExitStatus> {
    let path = PathModifier::new().prepend(dir).build()?;
    tracing::debug!(dir = %dir.display(), ?program, ?args, "executing");
    Command::new(program)
        .args(args)
        .env("PATH", path)
        .status()
        .map_err(|e| Error::io(format!("failed to run {}", program.to_string_lossy()), e))
}

/// The process exit code to forward for a child's status.
pub fn exit_code(status: ExitStatus) -> u8 {
    match status.code() {
        Some(code) => u8::try_from(code).unwrap_or(1),
        None => 1,
    }
}
