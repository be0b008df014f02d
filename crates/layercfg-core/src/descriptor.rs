//! Property descriptors
//!
//! A [`Descriptor`] identifies one configurable property: where it lives
//! (namespace and name), what it is for, what it defaults to, and the
//! [`BindingTag`] an injection layer uses to recognise it.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::binding::BindingTag;
use crate::key::{self, DEFAULT_SEPARATOR};
use crate::store::Configuration;
use crate::{Error, Result};

/// Anything that stands for a configurable property.
///
/// Implemented by [`Descriptor`] itself; user types (typically enums over a
/// [`DescriptorSet`](crate::DescriptorSet)) implement it to be passed
/// directly to [`Configuration`] accessors.
pub trait Configurable {
    fn descriptor(&self) -> &Descriptor;
}

/// Immutable metadata for one configuration property.
///
/// Built with a [`DescriptorBuilder`]. Namespace, name and description are
/// trimmed; the fully-qualified name is derived once at construction.
///
/// Equality compares namespace, name, description, default value and
/// binding tag.
#[derive(Debug, Clone)]
pub struct Descriptor {
    namespace: String,
    name: String,
    description: String,
    default_value: Option<String>,
    fully_qualified_name: String,
    binding_tag: BindingTag,
}

impl Descriptor {
    /// Start building a descriptor in `namespace` whose binding tag is
    /// produced by `tag_factory` from the resolved name.
    pub fn builder(
        namespace: impl Into<String>,
        tag_factory: impl Fn(&str) -> BindingTag + Send + Sync + 'static,
    ) -> DescriptorBuilder {
        DescriptorBuilder::new(namespace, tag_factory)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    pub fn binding_tag(&self) -> &BindingTag {
        &self.binding_tag
    }

    /// The value `config` resolves for this property, or the default.
    pub fn value<C: Configuration + ?Sized>(&self, config: &C) -> Option<String> {
        config
            .resolve_descriptor(self)
            .or_else(|| self.default_value.clone())
    }
}

impl Configurable for Descriptor {
    fn descriptor(&self) -> &Descriptor {
        self
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace
            && self.name == other.name
            && self.description == other.description
            && self.default_value == other.default_value
            && self.binding_tag == other.binding_tag
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
        self.description.hash(state);
        self.default_value.hash(state);
        self.binding_tag.hash(state);
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name)
    }
}

type TagFactory = Box<dyn Fn(&str) -> BindingTag + Send + Sync>;

/// Builder for [`Descriptor`].
///
/// The namespace is fixed up front (it may be empty for the global
/// namespace); the name must be set before [`build`](Self::build).
///
/// # Example
///
/// ```
/// use layercfg_core::{BindingTag, DescriptorBuilder};
///
/// let port = DescriptorBuilder::for_family("server", "ServerSetting")
///     .name(" PORT ")
///     .description("Listen port")
///     .default_value("8080")
///     .build()
///     .unwrap();
///
/// assert_eq!(port.fully_qualified_name(), "server-PORT");
/// assert_eq!(port.binding_tag(), &BindingTag::member("ServerSetting", "PORT"));
/// ```
pub struct DescriptorBuilder {
    namespace: String,
    separator: String,
    tag_factory: TagFactory,
    name: Option<String>,
    description: String,
    default_value: Option<String>,
}

impl DescriptorBuilder {
    /// Create a builder with a custom binding-tag factory.
    pub fn new(
        namespace: impl Into<String>,
        tag_factory: impl Fn(&str) -> BindingTag + Send + Sync + 'static,
    ) -> Self {
        Self {
            namespace: namespace.into().trim().to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            tag_factory: Box::new(tag_factory),
            name: None,
            description: String::new(),
            default_value: None,
        }
    }

    /// Builder for a member of an enumerated family.
    ///
    /// Every descriptor built this way is tagged
    /// [`BindingTag::Member`] with the given family name.
    pub fn for_family(namespace: impl Into<String>, family: impl Into<String>) -> Self {
        let family = family.into();
        Self::new(namespace, move |name| BindingTag::member(family.clone(), name))
    }

    /// Builder for a class-style singleton owned by `T`, namespaced by
    /// `T`'s type name.
    pub fn for_type<T: ?Sized + 'static>() -> Self {
        Self::for_type_in::<T>(std::any::type_name::<T>())
    }

    /// Like [`for_type`](Self::for_type) with an explicit namespace.
    pub fn for_type_in<T: ?Sized + 'static>(namespace: impl Into<String>) -> Self {
        Self::typed(std::any::type_name::<T>(), namespace)
    }

    pub(crate) fn typed(type_name: &'static str, namespace: impl Into<String>) -> Self {
        Self::new(namespace, move |name| BindingTag::typed(type_name, name))
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into().trim().to_string());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Set the default value. Stored verbatim.
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Set or clear the default value.
    pub fn maybe_default_value(mut self, default_value: Option<&str>) -> Self {
        self.default_value = default_value.map(str::to_string);
        self
    }

    /// Separator used to derive the fully-qualified name. Defaults to
    /// [`DEFAULT_SEPARATOR`]; it should match the store's separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Build the descriptor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDescriptor`] if the name is unset or blank, the
    /// separator is empty, or the name contains the separator.
    pub fn build(self) -> Result<Descriptor> {
        let name = match self.name {
            None => return Err(Error::invalid_descriptor("name must be set")),
            Some(name) if name.is_empty() => {
                return Err(Error::invalid_descriptor(format!(
                    "name must not be blank (namespace '{}')",
                    self.namespace
                )));
            }
            Some(name) => name,
        };
        if self.separator.is_empty() {
            return Err(Error::invalid_descriptor("separator must not be empty"));
        }
        if name.contains(&self.separator) {
            return Err(Error::invalid_descriptor(format!(
                "name '{}' contains the namespace separator '{}'",
                name, self.separator
            )));
        }

        let binding_tag = (self.tag_factory)(&name);
        let fully_qualified_name = key::compose(&self.namespace, &name, &self.separator);

        Ok(Descriptor {
            namespace: self.namespace,
            name,
            description: self.description,
            default_value: self.default_value,
            fully_qualified_name,
            binding_tag,
        })
    }
}

impl fmt::Debug for DescriptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorBuilder")
            .field("namespace", &self.namespace)
            .field("separator", &self.separator)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

/// A descriptor paired with the value resolved for it.
///
/// This is what an injection layer binds from; see
/// [`Configuration::for_all_non_null`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurableValue<'a> {
    descriptor: &'a Descriptor,
    value: String,
}

impl<'a> ConfigurableValue<'a> {
    pub fn new(descriptor: &'a Descriptor, value: impl Into<String>) -> Self {
        Self {
            descriptor,
            value: value.into(),
        }
    }

    pub fn binding_tag(&self) -> &'a BindingTag {
        self.descriptor.binding_tag()
    }

    pub fn default_value(&self) -> Option<&'a str> {
        self.descriptor.default_value()
    }

    pub fn namespace(&self) -> &'a str {
        self.descriptor.namespace()
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Configurable for ConfigurableValue<'_> {
    fn descriptor(&self) -> &Descriptor {
        self.descriptor
    }
}
