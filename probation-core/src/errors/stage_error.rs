use super::ConfigError;

/// Errors surfaced by a stage invocation.
///
/// `Forward` failures are non-fatal per item: the stage collects them in
/// the invocation outcome and keeps processing the remaining promoted
/// paths. Whether a forward failure kills the surrounding pipeline is the
/// pipeline's policy, not this crate's.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("forward sink rejected '{path}': {reason}")]
    Forward { path: String, reason: String },

    #[error("stage cancelled")]
    Cancelled,
}
