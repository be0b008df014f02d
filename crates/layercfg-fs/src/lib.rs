//! Sectioned configuration file sources for layercfg
//!
//! Provides the read-only [`FileSource`] contract the resolution engine
//! consumes, and [`SectionedFile`], an in-memory implementation loaded from
//! INI, TOML, JSON or YAML files.

pub mod error;
pub mod format;
pub mod ini;
pub mod io;
pub mod source;
pub mod structured;

pub use error::{Error, Result};
pub use format::SourceFormat;
pub use source::{FileSource, GLOBAL_SECTION, SectionedFile};
