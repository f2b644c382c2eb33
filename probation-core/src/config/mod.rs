//! Configuration for the probation stage.
//! TOML-based, defaults matching the documented option defaults.

pub mod stage_config;

pub use stage_config::StageConfig;
