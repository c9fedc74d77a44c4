//! `PATH` manipulation for child processes.

use crate::error::{Error, Result};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        let s = p.to_string_lossy();
        let s = s.trim_end_matches(['/', '\\']);
        if cfg!(windows) { s.to_lowercase() } else { s.to_string() }
    }
    normalize(p1) == normalize(p2)
}

/// Builds a `PATH` value from the current one.
#[derive(Debug, Clone)]
pub struct PathModifier {
    paths: Vec<PathBuf>,
}

impl Default for PathModifier {
    fn default() -> Self { Self::new() }
}

impl PathModifier {
    pub fn new() -> Self {
        Self {
            paths: path_env().unwrap_or_default(),
        }
    }

    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Moves `path` to the front, dropping any later duplicate.
    pub fn prepend(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn remove(mut self, path: &Path) -> Self {
        self.paths.retain(|p| !paths_equal(p, path));
        self
    }

    pub fn contains(&self, path: &Path) -> bool { self.paths.iter().any(|p| paths_equal(p, path)) }

    pub fn paths(&self) -> &[PathBuf] { &self.paths }

    pub fn build(self) -> Result<OsString> {
        env::join_paths(&self.paths).map_err(|e| Error::InvalidPathEntry(e.to_string()))
    }
}

pub fn path_env() -> Option<Vec<PathBuf>> {
    env::var_os("PATH").map(|val| env::split_paths(&val).collect())
}

pub fn is_in_path(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path_env().is_some_and(|paths| paths.iter().any(|p| paths_equal(p, path)))
}
