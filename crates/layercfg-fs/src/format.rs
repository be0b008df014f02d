//! Source format detection from file extensions

use std::fmt;
use std::path::Path;

use crate::{Error, Result};

/// On-disk formats a [`SectionedFile`](crate::SectionedFile) can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `[section]` headers followed by `key = value` lines
    Ini,
    /// Top-level tables are sections
    Toml,
    /// Top-level objects are sections
    Json,
    /// Top-level mappings are sections
    Yaml,
}

impl SourceFormat {
    /// Detect the format from a path's extension.
    ///
    /// - `.ini`, `.conf`, `.cfg` -> INI
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "ini" | "conf" | "cfg" => Ok(Self::Ini),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ini => "INI",
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
