//! Shared test utilities for the layercfg workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixture`]: [`ConfigDir`] temp directory holding config files

pub mod fixture;

pub use fixture::{ConfigDir, SAMPLE_INI};
