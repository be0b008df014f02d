//! INI reader
//!
//! Recognised line shapes, after trimming:
//!
//! - blank lines and lines starting with `;` or `#` are ignored
//! - `[name]` opens (or re-opens) a section
//! - `key = value` / `key: value` adds an entry to the current section
//!
//! Entries before the first header belong to the global section `""`.
//! A repeated key keeps the last value. Values are taken verbatim; there are
//! no inline comments, quoting or continuation lines.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::format::SourceFormat;
use crate::source::{GLOBAL_SECTION, SectionedFile};
use crate::{Error, Result};

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*([^\]]*?)\s*\]$").unwrap());

static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=:\[]+?)\s*[=:]\s*(.*)$").unwrap());

/// Parse INI text into a [`SectionedFile`].
///
/// `origin` is only used to label parse errors.
pub fn parse(content: &str, origin: &Path) -> Result<SectionedFile> {
    let mut file = SectionedFile::new();
    let mut current = GLOBAL_SECTION.to_string();

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(cap) = SECTION_HEADER.captures(line) {
            current = cap[1].to_string();
            file.ensure_section(&current);
            continue;
        }

        match ENTRY.captures(line) {
            Some(cap) => file.insert(&current, &cap[1], &cap[2]),
            None => {
                return Err(Error::parse(
                    origin,
                    SourceFormat::Ini.as_str(),
                    format!("line {}: expected `[section]` or `key = value`, got `{}`", index + 1, line),
                ));
            }
        }
    }

    Ok(file)
}
