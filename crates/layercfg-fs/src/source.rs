//! Read-only, section-organised configuration sources

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::format::SourceFormat;
use crate::{Result, ini, io, structured};

/// Name of the section holding entries that sit outside any section.
pub const GLOBAL_SECTION: &str = "";

/// Read-only accessor over sections of key/value pairs.
///
/// Lookups are infallible. Enumeration returns a `Result` so that sources
/// backed by something other than memory can report failures while listing
/// their structure.
pub trait FileSource: Send + Sync {
    /// Check whether a section with this name exists.
    fn section_exists(&self, section: &str) -> bool;

    /// Look up `key` inside `section`.
    fn get(&self, section: &str, key: &str) -> Option<&str>;

    /// List section names.
    fn sections(&self) -> Result<Vec<String>>;

    /// List the keys of one section. Unknown sections have no keys.
    fn keys(&self, section: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Section {
    order: Vec<String>,
    values: HashMap<String, String>,
}

impl Section {
    fn insert(&mut self, key: &str, value: &str) {
        if !self.values.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// An already-parsed configuration file held in memory.
///
/// Sections and keys keep the order in which they were first seen.
///
/// # Example
///
/// ```
/// use layercfg_fs::{FileSource, SectionedFile};
///
/// let file = SectionedFile::new()
///     .with_entry("db", "host", "localhost")
///     .with_entry("db", "port", "5432");
///
/// assert_eq!(file.get("db", "host"), Some("localhost"));
/// assert_eq!(file.keys("db").unwrap(), vec!["host", "port"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedFile {
    order: Vec<String>,
    sections: HashMap<String, Section>,
    origin: Option<PathBuf>,
}

impl SectionedFile {
    /// Create an empty source with no sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::detect(path)?;
        let content = io::read_text(path)?;
        Self::from_content(path, &content, format)
    }

    /// Load a file that may not exist.
    ///
    /// A missing file yields `Ok(None)` whatever its extension. An existing
    /// file with an unsupported extension, an unreadable file or malformed
    /// content is an error.
    pub fn open_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let Some(content) = io::read_text_optional(path)? else {
            tracing::debug!(?path, "No config file found - continuing without one");
            return Ok(None);
        };
        let format = SourceFormat::detect(path)?;
        Self::from_content(path, &content, format).map(Some)
    }

    /// Parse in-memory text of a known format.
    pub fn parse(content: &str, format: SourceFormat) -> Result<Self> {
        match format {
            SourceFormat::Ini => ini::parse(content, Path::new("<memory>")),
            _ => structured::parse(content, format, Path::new("<memory>")),
        }
    }

    fn from_content(path: &Path, content: &str, format: SourceFormat) -> Result<Self> {
        let mut file = match format {
            SourceFormat::Ini => ini::parse(content, path)?,
            _ => structured::parse(content, format, path)?,
        };
        tracing::debug!(
            ?path,
            %format,
            sections = file.len(),
            "Loaded config file"
        );
        file.origin = Some(path.to_path_buf());
        Ok(file)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, section: &str, key: &str, value: &str) -> Self {
        self.insert(section, key, value);
        self
    }

    /// Set `key` in `section`, creating the section if needed.
    pub fn insert(&mut self, section: &str, key: &str, value: &str) {
        self.section_mut(section).insert(key, value);
    }

    /// Make sure `section` exists, even if it ends up with no entries.
    pub fn ensure_section(&mut self, section: &str) {
        self.section_mut(section);
    }

    fn section_mut(&mut self, section: &str) -> &mut Section {
        if !self.sections.contains_key(section) {
            self.order.push(section.to_string());
        }
        self.sections.entry(section.to_string()).or_default()
    }

    /// Path this source was loaded from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the source has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FileSource for SectionedFile {
    fn section_exists(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.values.get(key))
            .map(String::as_str)
    }

    fn sections(&self) -> Result<Vec<String>> {
        Ok(self.order.clone())
    }

    fn keys(&self, section: &str) -> Result<Vec<String>> {
        Ok(self
            .sections
            .get(section)
            .map(|s| s.order.clone())
            .unwrap_or_default())
    }
}
