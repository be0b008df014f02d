//! Typed parsing of resolved string values

use crate::{Error, Result};

/// A type a resolved configuration string can be parsed into.
///
/// Parsing never coerces: anything that is not an exact representation of
/// the type is rejected. Surrounding whitespace is ignored for every type
/// except `String`.
pub trait ConfigValue: Sized {
    /// Name reported in [`Error::Format`].
    const TYPE_NAME: &'static str;

    fn parse_config(raw: &str) -> Option<Self>;
}

macro_rules! from_str_config_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_config(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

from_str_config_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// `true` or `false`, case-insensitive.
impl ConfigValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_config(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl ConfigValue for String {
    const TYPE_NAME: &'static str = "String";

    fn parse_config(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Parse an optional resolved value for `key`.
///
/// # Errors
///
/// [`Error::MissingValue`] when `raw` is `None`, [`Error::Format`] when it
/// does not parse as `T`.
pub fn parse_value<T: ConfigValue>(key: &str, raw: Option<String>) -> Result<T> {
    let raw = raw.ok_or_else(|| Error::MissingValue {
        key: key.to_string(),
    })?;
    T::parse_config(&raw).ok_or_else(|| Error::Format {
        key: key.to_string(),
        raw_value: raw,
        target_type: T::TYPE_NAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case(" False ", false)]
    #[case("false", false)]
    fn bool_accepts_true_and_false(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(bool::parse_config(raw), Some(expected));
    }

    #[rstest]
    #[case("yes")]
    #[case("1")]
    #[case("")]
    #[case("truthy")]
    fn bool_rejects_everything_else(#[case] raw: &str) {
        assert_eq!(bool::parse_config(raw), None);
    }

    #[test]
    fn numbers_ignore_surrounding_whitespace() {
        assert_eq!(i32::parse_config(" 8080\n"), Some(8080));
        assert_eq!(f64::parse_config("2.5 "), Some(2.5));
        assert_eq!(u16::parse_config("70000"), None);
    }

    #[test]
    fn strings_are_kept_verbatim() {
        assert_eq!(String::parse_config("  padded "), Some("  padded ".to_string()));
    }

    #[test]
    fn parse_value_missing() {
        let err = parse_value::<i32>("PORT", None).unwrap_err();
        assert!(matches!(err, Error::MissingValue { ref key } if key == "PORT"));
    }

    #[test]
    fn parse_value_format_error_carries_details() {
        let err = parse_value::<i32>("PORT", Some("invalid".into())).unwrap_err();
        match err {
            Error::Format {
                key,
                raw_value,
                target_type,
            } => {
                assert_eq!(key, "PORT");
                assert_eq!(raw_value, "invalid");
                assert_eq!(target_type, "i32");
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }
}
