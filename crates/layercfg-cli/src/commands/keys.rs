//! List known keys

use layercfg_core::Configuration;

use crate::error::Result;

/// Print every key known to the store, one per line, sorted.
pub fn run_keys(config: &dyn Configuration) -> Result<()> {
    for key in config.keys(&[])? {
        println!("{key}");
    }
    Ok(())
}
