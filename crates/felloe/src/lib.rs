//! # felloe
//!
//! Installs, switches between and removes versions of the `helm` client.
//!
//! Everything lives under one root directory (see [`layout::Layout`]):
//! installed versions under `versions/`, an index of them in `index.json`,
//! and the active version as the symlink `current`. A stable
//! `bin/helm -> ../current/helm` link is what goes on `PATH`.
//!
//! The pieces:
//!
//! - [`registry::Registry`] records what is installed.
//! - [`resolver::Resolver`] turns `latest`, `3.14` or a pin file into one version.
//! - [`fetcher::Fetcher`] downloads, verifies and unpacks a release.
//! - [`activation::Activator`] swaps the `current` link.

pub mod activation;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod fetcher;
pub mod layout;
pub mod logging;
pub mod pin;
pub mod registry;
pub mod resolver;
pub mod ui;

pub use error::{Error, Result};
