//! Store bootstrap from command-line flags
//!
//! Opens the file, registers aliases, applies `--set` overrides and freezes
//! the store before any command reads from it.

use std::path::Path;

use layercfg_core::{Configuration, SectionedConfiguration};
use layercfg_fs::SectionedFile;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Build a frozen store from the global flags.
pub fn load(cli: &Cli) -> Result<SectionedConfiguration> {
    let config = open(cli.file.as_deref(), &cli.separator)?;

    for alias in &cli.aliases {
        let (namespace, section) = split_pair(alias, "--alias", "NAMESPACE=SECTION")?;
        config.add_alias(namespace, section)?;
    }

    for assignment in &cli.overrides {
        let (key, value) = split_pair(assignment, "--set", "KEY=VALUE")?;
        config.put_fully_qualified_name(key, Some(value))?;
    }

    config.freeze();
    Ok(config)
}

fn open(file: Option<&Path>, separator: &str) -> Result<SectionedConfiguration> {
    match file {
        Some(path) => {
            let config = SectionedConfiguration::open_with_separator(separator, path)?;
            if !config.is_file_loaded() {
                tracing::debug!(?path, "No such config file");
            }
            Ok(config)
        }
        None => Ok(SectionedConfiguration::from_source::<SectionedFile>(separator, None)?),
    }
}

/// Split `LEFT=RIGHT` on the first `=`. The left side must not be empty.
fn split_pair<'a>(raw: &'a str, flag: &str, shape: &str) -> Result<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((left, right)) if !left.trim().is_empty() => Ok((left.trim(), right)),
        _ => Err(CliError::user(format!(
            "Invalid {flag} '{raw}': expected {shape}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use layercfg_test_utils::ConfigDir;

    #[test]
    fn split_pair_keeps_value_verbatim() {
        assert_eq!(split_pair("a=b=c", "--set", "KEY=VALUE").unwrap(), ("a", "b=c"));
        assert_eq!(split_pair(" k =", "--set", "KEY=VALUE").unwrap(), ("k", ""));
    }

    #[test]
    fn split_pair_rejects_missing_key() {
        assert!(split_pair("=v", "--set", "KEY=VALUE").is_err());
        assert!(split_pair("novalue", "--alias", "NAMESPACE=SECTION").is_err());
    }

    #[test]
    fn load_without_file_applies_overrides_and_freezes() {
        let cli = Cli::parse_from(["layercfg", "--set", "PORT=8080", "keys"]);
        let config = load(&cli).unwrap();

        assert!(config.is_frozen());
        assert!(!config.is_file_loaded());
        assert_eq!(config.get_i32_by_name("PORT").unwrap(), 8080);
    }

    #[test]
    fn open_rejects_empty_separator() {
        assert!(matches!(open(None, ""), Err(CliError::Core(_))));
    }

    #[test]
    fn file_errors_surface_through_core() {
        let dir = ConfigDir::new();
        let path = dir.write("bad.ini", "[db]\nno delimiter here\n");

        assert!(matches!(
            open(Some(path.as_path()), "-"),
            Err(CliError::Core(layercfg_core::Error::Fs(_)))
        ));
    }

    #[test]
    fn missing_file_of_unknown_format_is_not_an_error() {
        let dir = ConfigDir::new();
        let config = open(Some(dir.path("app.properties").as_path()), "-").unwrap();
        assert!(!config.is_file_loaded());
    }
}
