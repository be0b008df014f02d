//! Layered configuration resolution for layercfg
//!
//! This crate resolves named configuration properties through three layers,
//! first hit wins:
//!
//! - **Overlay**: values set programmatically during bootstrap
//! - **File**: a sectioned file, reached through namespace-to-section aliases
//! - **Defaults**: the default carried by each property's [`Descriptor`]
//!
//! # Architecture
//!
//! ```text
//!          application / injection layer
//!                       |
//!     DescriptorSet -> Configuration (SectionedConfiguration)
//!                       |
//!            NamespaceMapper + FileSource
//!                       |
//!                  layercfg-fs
//! ```
//!
//! A store is bootstrapped (aliases, defaults, overrides), then frozen and
//! shared read-only.
//!
//! # Example
//!
//! ```
//! use layercfg_core::{Configuration, DescriptorSet, SectionedConfiguration};
//!
//! fn example() -> layercfg_core::Result<()> {
//!     let settings = DescriptorSet::family("app.Server", "Server")
//!         .entry("PORT", Some("8080"))
//!         .build()?;
//!
//!     let config = SectionedConfiguration::open("does-not-exist.ini")?;
//!     config.put_fully_qualified_name("app.Server-PORT", Some("9090"))?;
//!     config.freeze();
//!
//!     assert_eq!(config.get_i32(&settings[0])?, 9090);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod binding;
pub mod descriptor;
pub mod error;
pub mod family;
pub mod key;
pub mod namespace;
pub mod store;
pub mod value;

pub use binding::BindingTag;
pub use descriptor::{Configurable, ConfigurableValue, Descriptor, DescriptorBuilder};
pub use error::{Error, Result};
pub use family::{DescriptorSet, DescriptorSetBuilder};
pub use namespace::NamespaceMapper;
pub use store::{Configuration, SectionedConfiguration};
pub use value::ConfigValue;
