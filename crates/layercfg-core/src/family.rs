//! Descriptor sets
//!
//! A [`DescriptorSet`] is the runtime form of an enumerated family or a
//! class of configuration constants: an ordered, immutable list of
//! descriptors sharing one namespace and one binding scheme.

use std::collections::HashSet;
use std::ops::Deref;

use crate::descriptor::{Descriptor, DescriptorBuilder};
use crate::key::DEFAULT_SEPARATOR;
use crate::{Error, Result};

/// Ordered, immutable collection of descriptors sharing a namespace.
///
/// # Example
///
/// ```
/// use layercfg_core::DescriptorSet;
///
/// let settings = DescriptorSet::family("app.Sample", "Sample")
///     .entry("TEST_NUMBER", Some("123"))
///     .entry("specialName", None)
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.len(), 2);
/// assert_eq!(settings.get("TEST_NUMBER").unwrap().default_value(), Some("123"));
/// assert_eq!(settings[1].fully_qualified_name(), "app.Sample-specialName");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorSet {
    namespace: String,
    descriptors: Vec<Descriptor>,
}

impl DescriptorSet {
    /// Start a set of enumerated-family members.
    pub fn family(namespace: impl Into<String>, family: impl Into<String>) -> DescriptorSetBuilder {
        DescriptorSetBuilder::new(namespace.into(), Scheme::Family(family.into()))
    }

    /// Start a set of class-style constants owned by `T`, namespaced by
    /// `T`'s type name.
    pub fn for_type<T: ?Sized + 'static>() -> DescriptorSetBuilder {
        Self::for_type_in::<T>(std::any::type_name::<T>())
    }

    pub fn for_type_in<T: ?Sized + 'static>(namespace: impl Into<String>) -> DescriptorSetBuilder {
        DescriptorSetBuilder::new(namespace.into(), Scheme::Typed(std::any::type_name::<T>()))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Descriptor with the given (trimmed) name.
    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn as_slice(&self) -> &[Descriptor] {
        &self.descriptors
    }
}

impl Deref for DescriptorSet {
    type Target = [Descriptor];

    fn deref(&self) -> &[Descriptor] {
        &self.descriptors
    }
}

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[derive(Debug, Clone)]
enum Scheme {
    Family(String),
    Typed(&'static str),
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    default_value: Option<String>,
    description: String,
}

/// Builder for [`DescriptorSet`]. Entries keep their declaration order.
#[derive(Debug, Clone)]
pub struct DescriptorSetBuilder {
    namespace: String,
    scheme: Scheme,
    separator: String,
    entries: Vec<Entry>,
}

impl DescriptorSetBuilder {
    fn new(namespace: String, scheme: Scheme) -> Self {
        Self {
            namespace,
            scheme,
            separator: DEFAULT_SEPARATOR.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn entry(self, name: impl Into<String>, default_value: Option<&str>) -> Self {
        self.entry_with_description(name, default_value, "")
    }

    pub fn entry_with_description(
        mut self,
        name: impl Into<String>,
        default_value: Option<&str>,
        description: impl Into<String>,
    ) -> Self {
        self.entries.push(Entry {
            name: name.into(),
            default_value: default_value.map(str::to_string),
            description: description.into(),
        });
        self
    }

    /// Separator for every descriptor in the set.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Build the set.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDescriptor`] on the first invalid entry, or if two
    /// entries share a name after trimming.
    pub fn build(self) -> Result<DescriptorSet> {
        let mut seen = HashSet::new();
        let mut descriptors = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            let builder = match &self.scheme {
                Scheme::Family(family) => DescriptorBuilder::for_family(self.namespace.clone(), family.clone()),
                Scheme::Typed(type_name) => DescriptorBuilder::typed(*type_name, self.namespace.clone()),
            };
            let descriptor = builder
                .separator(self.separator.clone())
                .name(entry.name)
                .description(entry.description)
                .maybe_default_value(entry.default_value.as_deref())
                .build()?;

            if !seen.insert(descriptor.name().to_string()) {
                return Err(Error::invalid_descriptor(format!(
                    "duplicate name '{}' in namespace '{}'",
                    descriptor.name(),
                    descriptor.namespace()
                )));
            }
            descriptors.push(descriptor);
        }

        Ok(DescriptorSet {
            namespace: self.namespace.trim().to_string(),
            descriptors,
        })
    }
}
