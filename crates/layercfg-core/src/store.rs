//! The configuration store and its resolution algorithm
//!
//! Values are resolved in this order, first hit wins:
//!
//! 1. the overlay of programmatically set values,
//! 2. the backing file, looked up through the namespace mapper,
//! 3. the descriptor's default (descriptor accessors only).
//!
//! A store is mutable while it is being bootstrapped and read-only once
//! frozen.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use layercfg_fs::{FileSource, SectionedFile};

use crate::descriptor::{Configurable, ConfigurableValue, Descriptor};
use crate::key::{self, DEFAULT_SEPARATOR};
use crate::namespace::NamespaceMapper;
use crate::value::{ConfigValue, parse_value};
use crate::{Error, Result};

/// Read and bootstrap surface of a configuration store.
///
/// Implementors provide resolution, enumeration and the single-key
/// mutation primitive; typed accessors and iteration helpers are derived
/// from those.
pub trait Configuration: Send + Sync {
    /// Resolve a fully-qualified name against the overlay and the file.
    /// Defaults are not consulted.
    fn resolve(&self, fully_qualified_name: &str) -> Option<String>;

    /// Resolve a descriptor against the overlay and the file. Defaults are
    /// not consulted.
    fn resolve_descriptor(&self, descriptor: &Descriptor) -> Option<String>;

    /// Set (`Some`) or remove (`None`) an overlay value.
    fn put_fully_qualified_name(&self, fully_qualified_name: &str, value: Option<&str>) -> Result<()>;

    /// Write each descriptor's default into the overlay.
    ///
    /// Descriptors without a default are skipped; they never remove an
    /// existing entry. Later descriptors overwrite earlier ones sharing a
    /// fully-qualified name.
    fn put_defaults(&self, descriptors: &[Descriptor]) -> Result<()>;

    /// Make the store permanently read-only. Idempotent.
    fn freeze(&self);

    fn is_frozen(&self) -> bool;

    /// Every known key: overlay keys, keys derivable from the file, and the
    /// fully-qualified names of `include`. Sorted.
    fn keys(&self, include: &[Descriptor]) -> Result<BTreeSet<String>>;

    /// Set a descriptor's overlay value; `None` removes it.
    fn put(&self, item: &dyn Configurable, value: Option<&str>) -> Result<()> {
        self.put_fully_qualified_name(item.descriptor().fully_qualified_name(), value)
    }

    /// Put a descriptor's own default. An absent default removes the entry.
    fn put_descriptor(&self, item: &dyn Configurable) -> Result<()> {
        let descriptor = item.descriptor();
        self.put(descriptor, descriptor.default_value())
    }

    /// Put `value` unless it is `None`. Returns whether a write happened.
    fn put_if_not_null(&self, item: &dyn Configurable, value: Option<&str>) -> Result<bool> {
        match value {
            Some(value) => {
                self.put(item, Some(value))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Put the descriptor's default unless it has none.
    fn put_descriptor_if_not_null(&self, item: &dyn Configurable) -> Result<bool> {
        let descriptor = item.descriptor();
        self.put_if_not_null(descriptor, descriptor.default_value())
    }

    /// Resolved value, falling back to the descriptor's default.
    fn get_string(&self, item: &dyn Configurable) -> Option<String> {
        item.descriptor().value(self)
    }

    fn get_i32(&self, item: &dyn Configurable) -> Result<i32> {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    fn get_i64(&self, item: &dyn Configurable) -> Result<i64> {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    fn get_f32(&self, item: &dyn Configurable) -> Result<f32> {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    fn get_f64(&self, item: &dyn Configurable) -> Result<f64> {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    fn get_bool(&self, item: &dyn Configurable) -> Result<bool> {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    /// Parse the descriptor's value (or default) as any [`ConfigValue`].
    fn get<T: ConfigValue>(&self, item: &dyn Configurable) -> Result<T>
    where
        Self: Sized,
    {
        parse_value(item.descriptor().fully_qualified_name(), self.get_string(item))
    }

    /// Resolved value for a fully-qualified name. There is no default to
    /// fall back to.
    fn get_string_by_name(&self, fully_qualified_name: &str) -> Option<String> {
        self.resolve(fully_qualified_name)
    }

    fn get_i32_by_name(&self, fully_qualified_name: &str) -> Result<i32> {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    fn get_i64_by_name(&self, fully_qualified_name: &str) -> Result<i64> {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    fn get_f32_by_name(&self, fully_qualified_name: &str) -> Result<f32> {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    fn get_f64_by_name(&self, fully_qualified_name: &str) -> Result<f64> {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    fn get_bool_by_name(&self, fully_qualified_name: &str) -> Result<bool> {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    fn get_by_name<T: ConfigValue>(&self, fully_qualified_name: &str) -> Result<T>
    where
        Self: Sized,
    {
        parse_value(fully_qualified_name, self.resolve(fully_qualified_name))
    }

    /// Visit every known key whose value resolves. Absent values are skipped.
    fn for_each(&self, visit: &mut dyn FnMut(&str, &str)) -> Result<()> {
        for key in self.keys(&[])? {
            if let Some(value) = self.resolve(&key) {
                visit(&key, &value);
            }
        }
        Ok(())
    }

    /// Pair each descriptor with its value (or default), skipping those
    /// that have neither.
    fn for_all_non_null<'a>(&self, descriptors: &'a [Descriptor]) -> Vec<ConfigurableValue<'a>> {
        descriptors
            .iter()
            .filter_map(|d| self.get_string(d).map(|value| ConfigurableValue::new(d, value)))
            .collect()
    }

    /// All resolved key/value pairs, sorted by key.
    fn snapshot(&self) -> Result<BTreeMap<String, String>> {
        let mut snapshot = BTreeMap::new();
        self.for_each(&mut |key, value| {
            snapshot.insert(key.to_string(), value.to_string());
        })?;
        Ok(snapshot)
    }

    /// Human-readable dump of every resolved key/value pair, one per line.
    fn all_settings(&self) -> Result<String> {
        let mut settings = String::new();
        self.for_each(&mut |key, value| {
            settings.push_str(&format!("key= '{key}'\t\t -> value= '{value}'\n"));
        })?;
        Ok(settings)
    }
}

/// A configuration store backed by an optional sectioned file.
///
/// # Example
///
/// ```
/// use layercfg_core::{Configuration, DescriptorBuilder, SectionedConfiguration};
/// use layercfg_fs::SectionedFile;
///
/// let port = DescriptorBuilder::for_family("", "Server")
///     .name("PORT")
///     .default_value("8080")
///     .build()
///     .unwrap();
///
/// let file = SectionedFile::new().with_entry("db", "host", "db.internal");
/// let config = SectionedConfiguration::from_source("-", Some(file))
///     .unwrap()
///     .with_alias("app.Db", "db")
///     .unwrap();
/// config.freeze();
///
/// assert_eq!(config.get_i32(&port).unwrap(), 8080);
/// assert_eq!(config.get_string_by_name("app.Db-host").as_deref(), Some("db.internal"));
/// ```
pub struct SectionedConfiguration {
    separator: String,
    overlay: RwLock<HashMap<String, String>>,
    namespaces: RwLock<NamespaceMapper>,
    source: Option<Box<dyn FileSource>>,
    frozen: AtomicBool,
}

impl SectionedConfiguration {
    /// Open a store bound to `path` with the default separator.
    ///
    /// The file does not have to exist; without it the store works from
    /// overlay values and defaults only.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty path, [`Error::Fs`] if the
    /// file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_separator(DEFAULT_SEPARATOR, path)
    }

    /// Open a store bound to `path` with a custom namespace separator.
    pub fn open_with_separator(separator: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_argument(
                "config file path must not be empty (the file itself need not exist)",
            ));
        }
        let source = SectionedFile::open_optional(path)?;
        if source.is_none() {
            tracing::debug!(?path, "Config file absent - using overlay and defaults only");
        }
        Self::from_source(separator, source)
    }

    /// Open a store whose file path is the default value of `descriptor`.
    pub fn open_descriptor(descriptor: &Descriptor) -> Result<Self> {
        let path = descriptor.default_value().ok_or_else(|| {
            Error::invalid_argument(format!(
                "descriptor '{}' has no default value to use as a file path",
                descriptor.fully_qualified_name()
            ))
        })?;
        Self::open(path)
    }

    /// Build a store over an in-memory source (or none).
    pub fn from_source<S: FileSource + 'static>(separator: &str, source: Option<S>) -> Result<Self> {
        if separator.is_empty() {
            return Err(Error::invalid_argument("namespace separator must not be empty"));
        }
        Ok(Self {
            separator: separator.to_string(),
            overlay: RwLock::new(HashMap::new()),
            namespaces: RwLock::new(NamespaceMapper::new()),
            source: source.map(|s| Box::new(s) as Box<dyn FileSource>),
            frozen: AtomicBool::new(false),
        })
    }

    /// Whether a backing file was found and loaded.
    pub fn is_file_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Map a namespace onto a file section. The first mapping registered for
    /// a namespace wins; later ones are ignored.
    pub fn add_alias(&self, namespace: &str, section: &str) -> Result<()> {
        let mut namespaces = write_lock(&self.namespaces);
        if self.is_frozen() {
            return Err(Error::Frozen);
        }
        if namespaces.register_alias(namespace, section) {
            tracing::debug!(namespace, section, "Registered namespace alias");
        } else {
            tracing::debug!(namespace, section, "Namespace already mapped - alias ignored");
        }
        Ok(())
    }

    /// Builder-style [`add_alias`](Self::add_alias).
    pub fn with_alias(self, namespace: &str, section: &str) -> Result<Self> {
        self.add_alias(namespace, section)?;
        Ok(self)
    }

    /// Builder-style [`put_defaults`](Configuration::put_defaults).
    pub fn with_defaults(self, descriptors: &[Descriptor]) -> Result<Self> {
        self.put_defaults(descriptors)?;
        Ok(self)
    }

    /// Look `local` up in the section `namespace` maps to, then in the raw
    /// namespace section if an alias redirected the first lookup.
    fn file_value(&self, namespace: &str, local: &str) -> Option<String> {
        let source = self.source.as_deref()?;
        let namespaces = read_lock(&self.namespaces);
        let section = namespaces.resolve_section(namespace);

        source
            .get(section, local)
            .or_else(|| {
                if section != namespace {
                    source.get(namespace, local)
                } else {
                    None
                }
            })
            .map(str::to_string)
    }

    /// Every key the file holds, reported under the first namespace aliased
    /// to its section (or the section name itself).
    fn file_entries(&self) -> Result<Vec<FileEntry>> {
        let Some(source) = self.source.as_deref() else {
            return Ok(Vec::new());
        };
        let reverse = read_lock(&self.namespaces).reverse_sections();
        let sections = source.sections().map_err(|err| Error::BackingStore {
            context: "listing sections".to_string(),
            source: err,
        })?;

        let mut entries = Vec::new();
        for section in sections {
            let namespace = reverse.get(&section).cloned().unwrap_or_else(|| section.clone());
            let section_keys = source.keys(&section).map_err(|err| Error::BackingStore {
                context: format!("listing keys of section '{section}'"),
                source: err,
            })?;
            for local in section_keys {
                entries.push(FileEntry {
                    key: key::compose(&namespace, &local, &self.separator),
                    namespace: namespace.clone(),
                    local,
                });
            }
        }
        Ok(entries)
    }

    /// Overlay write access, refused once frozen.
    fn overlay_for_write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        let overlay = write_lock(&self.overlay);
        if self.is_frozen() {
            return Err(Error::Frozen);
        }
        Ok(overlay)
    }
}

impl Configuration for SectionedConfiguration {
    fn resolve(&self, fully_qualified_name: &str) -> Option<String> {
        if let Some(value) = read_lock(&self.overlay).get(fully_qualified_name) {
            return Some(value.clone());
        }
        let (namespace, local) = key::split(fully_qualified_name, &self.separator);
        self.file_value(namespace, local)
    }

    fn resolve_descriptor(&self, descriptor: &Descriptor) -> Option<String> {
        if let Some(value) = read_lock(&self.overlay).get(descriptor.fully_qualified_name()) {
            return Some(value.clone());
        }
        self.file_value(descriptor.namespace(), descriptor.name())
    }

    fn put_fully_qualified_name(&self, fully_qualified_name: &str, value: Option<&str>) -> Result<()> {
        let mut overlay = self.overlay_for_write()?;
        match value {
            Some(value) => {
                overlay.insert(fully_qualified_name.to_string(), value.to_string());
                tracing::debug!(key = fully_qualified_name, value, "put");
            }
            None => {
                overlay.remove(fully_qualified_name);
                tracing::debug!(key = fully_qualified_name, "value removed");
            }
        }
        Ok(())
    }

    fn put_defaults(&self, descriptors: &[Descriptor]) -> Result<()> {
        let mut overlay = self.overlay_for_write()?;
        for descriptor in descriptors {
            if let Some(value) = descriptor.default_value() {
                overlay.insert(descriptor.fully_qualified_name().to_string(), value.to_string());
                tracing::debug!(key = descriptor.fully_qualified_name(), value, "put default");
            }
        }
        Ok(())
    }

    fn freeze(&self) {
        // Taken so no write is mid-flight when the flag flips
        let _namespaces = write_lock(&self.namespaces);
        let _overlay = write_lock(&self.overlay);
        if !self.frozen.swap(true, Ordering::AcqRel) {
            tracing::debug!("Configuration frozen");
        }
    }

    fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn keys(&self, include: &[Descriptor]) -> Result<BTreeSet<String>> {
        let mut keys: BTreeSet<String> = read_lock(&self.overlay).keys().cloned().collect();
        keys.extend(self.file_entries()?.into_iter().map(|entry| entry.key));
        keys.extend(include.iter().map(|d| d.fully_qualified_name().to_string()));
        Ok(keys)
    }

    /// File entries are read by their (namespace, local) pair rather than
    /// by re-splitting the composed key, so a local name containing the
    /// separator is still visited.
    fn for_each(&self, visit: &mut dyn FnMut(&str, &str)) -> Result<()> {
        let mut entries: BTreeMap<String, String> = read_lock(&self.overlay)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for entry in self.file_entries()? {
            if entries.contains_key(&entry.key) {
                continue;
            }
            if let Some(value) = self.file_value(&entry.namespace, &entry.local) {
                entries.insert(entry.key, value);
            }
        }

        for (key, value) in &entries {
            visit(key, value);
        }
        Ok(())
    }
}

struct FileEntry {
    key: String,
    namespace: String,
    local: String,
}

impl std::fmt::Debug for SectionedConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // One lock at a time; freeze() takes both
        let overlay_len = read_lock(&self.overlay).len();
        let aliases = read_lock(&self.namespaces).len();
        f.debug_struct("SectionedConfiguration")
            .field("separator", &self.separator)
            .field("overlay_len", &overlay_len)
            .field("aliases", &aliases)
            .field("file_loaded", &self.is_file_loaded())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

// Every mutation is a single insert/remove, so a poisoned lock still guards
// consistent data.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
