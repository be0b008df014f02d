//! Namespace to section mapping
//!
//! Namespaces are logical (often type names such as `app.db.Settings`);
//! sections are whatever the backing file calls them (`[db]`). The mapper
//! holds the aliases between the two.

use std::collections::HashMap;

/// Registry mapping logical namespaces to physical file sections.
///
/// The first registration for a namespace wins and later ones are ignored.
/// Several namespaces may alias the same section.
///
/// # Example
///
/// ```
/// use layercfg_core::NamespaceMapper;
///
/// let mut mapper = NamespaceMapper::new();
/// mapper.register_alias("app.db.Settings", "db");
/// assert_eq!(mapper.resolve_section("app.db.Settings"), "db");
/// assert_eq!(mapper.resolve_section("cache"), "cache");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NamespaceMapper {
    /// Registration order, used for reverse lookups
    aliases: Vec<(String, String)>,
    /// Maps namespace to its index in `aliases`
    index: HashMap<String, usize>,
}

impl NamespaceMapper {
    /// Create a new empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `namespace` onto `section`.
    ///
    /// Returns `false` without changing anything if `namespace` is already
    /// mapped.
    pub fn register_alias(&mut self, namespace: impl Into<String>, section: impl Into<String>) -> bool {
        let namespace = namespace.into();
        if self.index.contains_key(&namespace) {
            return false;
        }
        self.index.insert(namespace.clone(), self.aliases.len());
        self.aliases.push((namespace, section.into()));
        true
    }

    /// Section registered for `namespace`, if any.
    pub fn section_for(&self, namespace: &str) -> Option<&str> {
        self.index
            .get(namespace)
            .map(|&idx| self.aliases[idx].1.as_str())
    }

    /// Section to read `namespace` from: the registered alias, or the
    /// namespace itself when none is registered.
    pub fn resolve_section<'a>(&'a self, namespace: &'a str) -> &'a str {
        self.section_for(namespace).unwrap_or(namespace)
    }

    /// Map each aliased section back to the first namespace registered for it.
    pub fn reverse_sections(&self) -> HashMap<String, String> {
        let mut reverse = HashMap::new();
        for (namespace, section) in &self.aliases {
            reverse
                .entry(section.clone())
                .or_insert_with(|| namespace.clone());
        }
        reverse
    }

    /// Registered `(namespace, section)` pairs in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(namespace, section)| (namespace.as_str(), section.as_str()))
    }

    /// Get the number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check if no alias is registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
