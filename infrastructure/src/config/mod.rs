//! Configuration file loading for groupgo
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GROUPGO_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./groupgo.toml` or `./.groupgo.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/groupgo/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGenerationConfig, FileLoggingConfig, FileOutputConfig, FileVotingConfig,
};
pub use loader::ConfigLoader;
