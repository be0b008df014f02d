//! Fully-qualified key derivation
//!
//! A fully-qualified name is `namespace + separator + name`, or just `name`
//! in the global (empty) namespace. Decomposition splits on the *last*
//! separator, so a namespace may contain the separator but a name may not.

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Join a namespace and a local name into a fully-qualified name.
///
/// ```
/// use layercfg_core::key::compose;
///
/// assert_eq!(compose("db", "host", "-"), "db-host");
/// assert_eq!(compose("", "PORT", "-"), "PORT");
/// ```
pub fn compose(namespace: &str, name: &str, separator: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{separator}{name}")
    }
}

/// Split a fully-qualified name into `(namespace, name)` on the last
/// occurrence of `separator`.
///
/// Without a separator the whole key is the name and the namespace is empty.
///
/// ```
/// use layercfg_core::key::split;
///
/// assert_eq!(split("pkg.Foo-key", "-"), ("pkg.Foo", "key"));
/// assert_eq!(split("a-b-c", "-"), ("a-b", "c"));
/// assert_eq!(split("PORT", "-"), ("", "PORT"));
/// ```
pub fn split<'a>(fully_qualified_name: &'a str, separator: &str) -> (&'a str, &'a str) {
    if separator.is_empty() {
        return ("", fully_qualified_name);
    }
    match fully_qualified_name.rfind(separator) {
        Some(idx) => (
            &fully_qualified_name[..idx],
            &fully_qualified_name[idx + separator.len()..],
        ),
        None => ("", fully_qualified_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("db-host", "-", ("db", "host"))]
    #[case("a.b.C-NAME", "-", ("a.b.C", "NAME"))]
    #[case("ns-with-dashes-leaf", "-", ("ns-with-dashes", "leaf"))]
    #[case("PORT", "-", ("", "PORT"))]
    #[case("-leading", "-", ("", "leading"))]
    #[case("trailing-", "-", ("trailing", ""))]
    #[case("app::db::host", "::", ("app::db", "host"))]
    fn split_on_last_separator(
        #[case] key: &str,
        #[case] separator: &str,
        #[case] expected: (&str, &str),
    ) {
        assert_eq!(split(key, separator), expected);
    }

    #[test]
    fn split_with_empty_separator_keeps_whole_key() {
        assert_eq!(split("db-host", ""), ("", "db-host"));
    }

    #[test]
    fn compose_global_namespace_is_bare_name() {
        assert_eq!(compose("", "PORT", "-"), "PORT");
        assert_eq!(compose("db", "port", "::"), "db::port");
    }
}
