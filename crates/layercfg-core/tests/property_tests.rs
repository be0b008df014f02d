use layercfg_core::key::{compose, split};
use layercfg_core::{Configuration, DescriptorBuilder, SectionedConfiguration};
use layercfg_fs::SectionedFile;
use proptest::prelude::*;

fn store(file: Option<SectionedFile>) -> SectionedConfiguration {
    SectionedConfiguration::from_source("-", file).unwrap()
}

proptest! {
    #[test]
    fn test_compose_then_split_roundtrip(ns in "[a-zA-Z.-]{0,12}", name in "[a-zA-Z_.]{1,12}") {
        // Names never contain the separator; namespaces may
        let fqn = compose(&ns, &name, "-");
        prop_assert_eq!(split(&fqn, "-"), (ns.as_str(), name.as_str()));
    }

    #[test]
    fn test_overlay_put_get_roundtrip(key in "[a-z]{1,8}(-[a-z]{1,8})?", value in "\\PC*") {
        let config = store(None);
        config.put_fully_qualified_name(&key, Some(value.as_str())).unwrap();
        prop_assert_eq!(config.resolve(&key), Some(value));
    }

    #[test]
    fn test_overlay_always_shadows_file(
        section in "[a-z]{1,8}",
        local in "[a-z]{1,8}",
        file_value in "[a-z0-9]{0,8}",
        overlay_value in "[A-Z0-9]{0,8}",
    ) {
        let config = store(Some(SectionedFile::new().with_entry(&section, &local, &file_value)));
        let key = compose(&section, &local, "-");
        prop_assert_eq!(config.resolve(&key), Some(file_value));

        config.put_fully_qualified_name(&key, Some(overlay_value.as_str())).unwrap();
        prop_assert_eq!(config.resolve(&key), Some(overlay_value));
    }

    #[test]
    fn test_integer_values_parse_back(n in any::<i64>()) {
        let d = DescriptorBuilder::for_family("ns", "F").name("N").build().unwrap();
        let config = store(None);
        config.put(&d, Some(n.to_string().as_str())).unwrap();
        prop_assert_eq!(config.get_i64(&d).unwrap(), n);
    }

    #[test]
    fn test_default_used_only_when_nothing_resolves(default in "[0-9]{1,6}", set in proptest::option::of("[0-9]{1,6}")) {
        let d = DescriptorBuilder::for_family("ns", "F")
            .name("N")
            .default_value(default.clone())
            .build()
            .unwrap();
        let config = store(None);
        config.put(&d, set.as_deref()).unwrap();

        let expected = set.unwrap_or(default);
        prop_assert_eq!(config.get_string(&d), Some(expected));
    }
}
