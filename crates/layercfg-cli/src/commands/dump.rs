//! Dump every resolved setting

use colored::Colorize;
use layercfg_core::Configuration;

use crate::error::Result;

/// Print all resolved key/value pairs, as text or as a JSON object.
pub fn run_dump(config: &dyn Configuration, json: bool) -> Result<()> {
    if json {
        let snapshot = config.snapshot()?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let settings = config.all_settings()?;
    if settings.is_empty() {
        println!("{}", "(no settings)".dimmed());
    } else {
        print!("{settings}");
    }
    Ok(())
}
