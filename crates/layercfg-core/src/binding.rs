//! Opaque binding tags
//!
//! A binding tag identifies a descriptor to whatever injection layer
//! consumes resolved values. The core never interprets it; it only carries
//! it and compares it structurally.

use std::fmt;

/// Identity a descriptor presents to the consuming injection layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingTag {
    /// Member of an enumerated family; every member shares the family's scheme.
    Member { family: String, member: String },

    /// Class-style singleton bound by its owning type plus a key.
    Typed { type_name: String, key: String },

    /// Plain string binding.
    Named(String),
}

impl BindingTag {
    pub fn member(family: impl Into<String>, member: impl Into<String>) -> Self {
        Self::Member {
            family: family.into(),
            member: member.into(),
        }
    }

    pub fn typed(type_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Typed {
            type_name: type_name.into(),
            key: key.into(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for BindingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member { family, member } => write!(f, "@{family}({member})"),
            Self::Typed { type_name, key } => write!(f, "@Conf(type={type_name}, key={key})"),
            Self::Named(name) => write!(f, "@Named({name})"),
        }
    }
}
