//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// layercfg - Inspect layered configuration: overrides, file sections, defaults
#[derive(Parser, Debug)]
#[command(name = "layercfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (INI, TOML, JSON or YAML). It need not exist.
    #[arg(short, long, global = true, env = "LAYERCFG_FILE")]
    pub file: Option<PathBuf>,

    /// Separator between namespace and key name
    #[arg(long, global = true, default_value = "-")]
    pub separator: String,

    /// Map a namespace onto a file section
    ///
    /// Examples:
    ///   --alias app.db.Settings=db
    #[arg(long = "alias", value_name = "NAMESPACE=SECTION", global = true)]
    pub aliases: Vec<String>,

    /// Override a value by fully-qualified name
    ///
    /// Examples:
    ///   --set db-port=6543
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every resolved key and value
    Dump {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single fully-qualified key
    Get {
        /// Fully-qualified key, e.g. db-host
        key: String,

        /// Type to parse the value as
        #[arg(long = "as", value_enum, default_value_t = ValueType::String)]
        as_type: ValueType,
    },

    /// List every known key
    Keys,
}

/// Value types accepted by `get --as`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    I32,
    I64,
    F32,
    F64,
    Bool,
}
