//! Command implementations for layercfg-cli

pub mod dump;
pub mod get;
pub mod keys;

pub use dump::run_dump;
pub use get::run_get;
pub use keys::run_keys;
