//! Resolve a single key

use layercfg_core::Configuration;

use crate::cli::ValueType;
use crate::error::{CliError, Result};

/// Resolve `key` and print it, parsed as `as_type`.
///
/// A missing value is an error for every type, including `string`.
pub fn run_get(config: &dyn Configuration, key: &str, as_type: ValueType) -> Result<()> {
    println!("{}", render(config, key, as_type)?);
    Ok(())
}

fn render(config: &dyn Configuration, key: &str, as_type: ValueType) -> Result<String> {
    let rendered = match as_type {
        ValueType::String => config
            .get_string_by_name(key)
            .ok_or_else(|| CliError::user(format!("No value configured for '{key}'")))?,
        ValueType::I32 => config.get_i32_by_name(key)?.to_string(),
        ValueType::I64 => config.get_i64_by_name(key)?.to_string(),
        ValueType::F32 => config.get_f32_by_name(key)?.to_string(),
        ValueType::F64 => config.get_f64_by_name(key)?.to_string(),
        ValueType::Bool => config.get_bool_by_name(key)?.to_string(),
    };
    Ok(rendered)
}
