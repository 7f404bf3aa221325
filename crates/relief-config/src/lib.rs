//! Configuration for the relief terrain pipeline.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Missing fields fall back to defaults and unknown fields are
//! ignored, so older and newer files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, ExportConfig, TerrainConfig, default_config_dir};
pub use error::ConfigError;
