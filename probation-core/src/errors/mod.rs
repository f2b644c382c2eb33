//! Error handling for the probation stage.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod read_error;
pub mod stage_error;

pub use config_error::ConfigError;
pub use read_error::ReadError;
pub use stage_error::StageError;
