//! Configuration loading and validation
//!
//! TOML configuration with kebab-case keys, parsed with serde and validated
//! after parse. A config hash detects changes between runs.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{CatalogConfig, Config, OutputConfig, RunnerConfig, TaskEntry};
pub use validation::validate;
