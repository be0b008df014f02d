//! TOML, JSON and YAML readers
//!
//! All three are read into a `serde_json::Value` tree and flattened the same
//! way: nested tables become sections, top-level scalars go to the global
//! section. Only one level of nesting is kept; arrays, nulls and deeper tables
//! are skipped.

use serde_json::{Map, Value};
use std::path::Path;

use crate::format::SourceFormat;
use crate::source::{GLOBAL_SECTION, SectionedFile};
use crate::{Error, Result};

/// Parse structured text of the given format into a [`SectionedFile`].
pub fn parse(content: &str, format: SourceFormat, origin: &Path) -> Result<SectionedFile> {
    let parse_error = |message: String| Error::parse(origin, format.as_str(), message);

    let root = match format {
        SourceFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            toml_to_json(toml::Value::Table(table))
        }
        SourceFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        SourceFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        }
        SourceFormat::Ini => return crate::ini::parse(content, origin),
    };

    match root {
        Value::Object(map) => Ok(flatten(map, origin)),
        // An empty YAML document
        Value::Null => Ok(SectionedFile::new()),
        other => Err(parse_error(format!(
            "top level must be a table of sections, found {}",
            kind(&other)
        ))),
    }
}

fn flatten(root: Map<String, Value>, origin: &Path) -> SectionedFile {
    let mut file = SectionedFile::new();

    for (name, value) in root {
        match value {
            Value::Object(entries) => {
                file.ensure_section(&name);
                for (key, value) in entries {
                    match scalar(&value) {
                        Some(text) => file.insert(&name, &key, &text),
                        None => tracing::warn!(
                            ?origin,
                            section = %name,
                            %key,
                            kind = kind(&value),
                            "Skipping non-scalar config value"
                        ),
                    }
                }
            }
            other => match scalar(&other) {
                Some(text) => file.insert(GLOBAL_SECTION, &name, &text),
                None => tracing::warn!(
                    ?origin,
                    key = %name,
                    kind = kind(&other),
                    "Skipping non-scalar config value"
                ),
            },
        }
    }

    file
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

/// Convert a TOML value to JSON, rendering datetimes as their TOML text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
