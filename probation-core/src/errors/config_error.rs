/// Setup-time configuration errors. All of these are fatal: the stage
/// refuses to start rather than limp along with a broken interval or sink.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("interval spec '{spec}' is missing the anchor keyword '{anchor}'")]
    MissingAnchor { spec: String, anchor: &'static str },

    #[error("invalid interval spec '{spec}': {reason}")]
    InvalidInterval { spec: String, reason: String },

    #[error("forward sink does not accept {missing:?} tokens")]
    IncompatibleSink { missing: crate::batch::ElementKind },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}
