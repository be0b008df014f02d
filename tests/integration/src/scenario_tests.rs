//! End-to-end resolution scenarios over the public API

use layercfg_core::{
    Configuration, Descriptor, DescriptorBuilder, DescriptorSet, Error, SectionedConfiguration,
};
use layercfg_fs::SectionedFile;
use layercfg_test_utils::ConfigDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn port() -> Descriptor {
    DescriptorBuilder::for_family("", "Server")
        .name("PORT")
        .default_value("8080")
        .build()
        .unwrap()
}

fn empty_store() -> SectionedConfiguration {
    SectionedConfiguration::from_source::<SectionedFile>("-", None).unwrap()
}

#[test]
fn port_defaults_then_fails_on_invalid_override() {
    let config = empty_store();
    let port = port();

    assert_eq!(config.get_string(&port).as_deref(), Some("8080"));
    assert_eq!(config.get_i32(&port).unwrap(), 8080);

    config.put_fully_qualified_name("PORT", Some("invalid")).unwrap();
    assert!(matches!(config.get_i32(&port), Err(Error::Format { .. })));
}

#[test]
fn put_defaults_is_idempotent() {
    let settings = DescriptorSet::family("app", "App")
        .entry("a", Some("1"))
        .entry("b", None)
        .entry("c", Some("3"))
        .build()
        .unwrap();

    let once = empty_store();
    once.put_defaults(&settings).unwrap();

    let twice = empty_store();
    twice.put_defaults(&settings).unwrap();
    twice.put_defaults(&settings).unwrap();

    assert_eq!(once.snapshot().unwrap(), twice.snapshot().unwrap());
    assert_eq!(once.keys(&[]).unwrap().len(), 2);
}

#[test]
fn put_if_not_null_only_writes_present_values() {
    let config = empty_store();
    let port = port();
    let before = config.snapshot().unwrap();

    assert!(!config.put_if_not_null(&port, None).unwrap());
    assert_eq!(config.snapshot().unwrap(), before);

    assert!(config.put_if_not_null(&port, Some("v")).unwrap());
    let via_put = empty_store();
    via_put.put(&port, Some("v")).unwrap();
    assert_eq!(config.snapshot().unwrap(), via_put.snapshot().unwrap());

    assert!(config.put_descriptor_if_not_null(&port).unwrap());
    assert_eq!(config.resolve("PORT").as_deref(), Some("8080"));
}

#[rstest]
#[case::with_default(Some("true"), Ok(true))]
#[case::without_default(None, Err(()))]
fn typed_accessor_default_policy(#[case] default: Option<&str>, #[case] expected: Result<bool, ()>) {
    let flag = DescriptorBuilder::for_family("feature", "Feature")
        .name("ENABLED")
        .maybe_default_value(default)
        .build()
        .unwrap();
    let config = empty_store();

    let actual = config.get_bool(&flag);
    match expected {
        Ok(value) => assert_eq!(actual.unwrap(), value),
        Err(()) => assert!(matches!(actual, Err(Error::MissingValue { .. }))),
    }
    // The by-name accessor never sees the default
    assert!(matches!(
        config.get_bool_by_name("feature-ENABLED"),
        Err(Error::MissingValue { .. })
    ));
}

#[test]
fn frozen_store_rejects_every_mutation_but_still_reads() {
    let (_dir, path) = ConfigDir::with_sample();
    let config = SectionedConfiguration::open(&path)
        .unwrap()
        .with_alias("pkg.Foo", "Foo")
        .unwrap()
        .with_defaults(&[port()])
        .unwrap();
    config.freeze();

    let port = port();
    assert!(matches!(config.put(&port, Some("1")), Err(Error::Frozen)));
    assert!(matches!(config.put(&port, None), Err(Error::Frozen)));
    assert!(matches!(config.put_descriptor(&port), Err(Error::Frozen)));
    assert!(matches!(config.put_descriptor_if_not_null(&port), Err(Error::Frozen)));
    assert!(matches!(config.put_defaults(&[port.clone()]), Err(Error::Frozen)));
    assert!(matches!(config.add_alias("x", "y"), Err(Error::Frozen)));

    assert_eq!(config.get_i32(&port).unwrap(), 8080);
    assert_eq!(config.resolve("pkg.Foo-key").as_deref(), Some("X"));
}

#[test]
fn yaml_file_with_alias() {
    let dir = ConfigDir::new();
    let path = dir.write(
        "app.yaml",
        "PORT: 7000\ndb:\n  host: yaml-host\n  replicas: [a, b]\n",
    );
    let config = SectionedConfiguration::open(&path)
        .unwrap()
        .with_alias("app.Db", "db")
        .unwrap();

    assert_eq!(config.get_i32_by_name("PORT").unwrap(), 7000);
    assert_eq!(config.get_string_by_name("app.Db-host").as_deref(), Some("yaml-host"));
    // Sequences are not scalar settings
    assert_eq!(config.get_string_by_name("app.Db-replicas"), None);
}

#[test]
fn json_file_resolves_like_ini() {
    let dir = ConfigDir::new();
    let path = dir.write("app.json", r#"{"db": {"host": "json-host", "port": 5432}}"#);
    let config = SectionedConfiguration::open(&path).unwrap();

    assert_eq!(config.get_string_by_name("db-host").as_deref(), Some("json-host"));
    assert_eq!(config.get_i64_by_name("db-port").unwrap(), 5432);
}
