use std::path::PathBuf;

/// Errors a container reader may raise while attempting to load a file.
///
/// These never cross the stage boundary: the validity checker catches
/// them and maps the attempt to "not valid now".
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed container file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("no containers in {path}")]
    Empty { path: PathBuf },
}
