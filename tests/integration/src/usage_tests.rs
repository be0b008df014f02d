//! How an application declares its settings and hands them to an
//! injection layer.
//!
//! `SampleSetting` is an enumerated family backed by a `DescriptorSet`;
//! `SampleClass` holds class-style constants. `Injector` stands in for the
//! external container that binds resolved values by their tags.

use std::collections::HashMap;
use std::sync::LazyLock;

use layercfg_core::{
    BindingTag, Configurable, Configuration, Descriptor, DescriptorSet, SectionedConfiguration,
};
use layercfg_test_utils::ConfigDir;
use pretty_assertions::assert_eq;

static SAMPLE_SETTINGS: LazyLock<DescriptorSet> = LazyLock::new(|| {
    DescriptorSet::family("SampleEnum", "SampleEnum")
        .entry_with_description("TEST_NUMBER", Some("123"), "A number")
        .entry("specialName", None)
        .entry("NO_VALUE", None)
        .build()
        .expect("sample settings are valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleSetting {
    TestNumber,
    SpecialName,
    NoValue,
}

impl Configurable for SampleSetting {
    fn descriptor(&self) -> &Descriptor {
        &SAMPLE_SETTINGS[*self as usize]
    }
}

struct SampleClass;

static SAMPLE_CLASS: LazyLock<DescriptorSet> = LazyLock::new(|| {
    DescriptorSet::for_type_in::<SampleClass>("pkg.SampleClass")
        .entry("FOO", Some("foo-default"))
        .entry("BAR", None)
        .build()
        .expect("sample class settings are valid")
});

/// Binds values by tag, the way a DI container would.
#[derive(Default)]
struct Injector {
    bindings: HashMap<BindingTag, String>,
}

impl Injector {
    fn bind_all(&mut self, config: &dyn Configuration, descriptors: &[Descriptor]) {
        for entry in config.for_all_non_null(descriptors) {
            self.bindings
                .insert(entry.binding_tag().clone(), entry.value().to_string());
        }
    }

    fn lookup(&self, tag: &BindingTag) -> Option<&str> {
        self.bindings.get(tag).map(String::as_str)
    }
}

fn bootstrap() -> (ConfigDir, SectionedConfiguration) {
    let (dir, path) = ConfigDir::with_sample();
    let config = SectionedConfiguration::open(&path)
        .unwrap()
        .with_alias("pkg.SampleClass", "Foo")
        .unwrap();
    (dir, config)
}

#[test]
fn enum_members_are_configurable() {
    let (_dir, config) = bootstrap();
    config.freeze();

    assert_eq!(config.get_i32(&SampleSetting::TestNumber).unwrap(), 456);
    assert_eq!(
        config.get_string(&SampleSetting::SpecialName).as_deref(),
        Some("from-file")
    );
    assert_eq!(config.get_string(&SampleSetting::NoValue), None);
    assert_eq!(SampleSetting::TestNumber.descriptor().description(), "A number");
}

#[test]
fn overlay_on_enum_member() {
    let (_dir, config) = bootstrap();
    config.put(&SampleSetting::TestNumber, Some("1")).unwrap();
    config.freeze();

    let value: u8 = config.get(&SampleSetting::TestNumber).unwrap();
    assert_eq!(value, 1);
}

#[test]
fn injector_binds_every_resolved_value() {
    let (_dir, config) = bootstrap();
    config.freeze();

    let mut injector = Injector::default();
    injector.bind_all(&config, &SAMPLE_SETTINGS);
    injector.bind_all(&config, &SAMPLE_CLASS);

    assert_eq!(
        injector.lookup(&BindingTag::member("SampleEnum", "TEST_NUMBER")),
        Some("456")
    );
    assert_eq!(
        injector.lookup(&BindingTag::member("SampleEnum", "specialName")),
        Some("from-file")
    );
    assert_eq!(injector.lookup(&BindingTag::member("SampleEnum", "NO_VALUE")), None);

    let class = std::any::type_name::<SampleClass>();
    assert_eq!(
        injector.lookup(&BindingTag::typed(class, "FOO")),
        Some("foo-default")
    );
    assert_eq!(injector.lookup(&BindingTag::typed(class, "BAR")), None);
    assert_eq!(injector.bindings.len(), 3);
}

#[test]
fn class_constants_read_through_alias() {
    let (_dir, config) = bootstrap();
    let key = DescriptorSet::for_type_in::<SampleClass>("pkg.SampleClass")
        .entry("key", None)
        .build()
        .unwrap();

    // Section [Foo] answers for the aliased namespace
    assert_eq!(config.get_string(&key[0]).as_deref(), Some("X"));
}

#[test]
fn for_each_visits_sorted_resolved_pairs() {
    let (_dir, config) = bootstrap();
    config.put_defaults(&SAMPLE_CLASS).unwrap();
    config.freeze();

    let mut seen = Vec::new();
    config
        .for_each(&mut |key, value| seen.push(format!("{key}={value}")))
        .unwrap();

    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert!(seen.contains(&"pkg.SampleClass-FOO=foo-default".to_string()));
    assert!(seen.contains(&"pkg.SampleClass-key=X".to_string()));
    assert!(!seen.iter().any(|entry| entry.starts_with("pkg.SampleClass-BAR")));
}
