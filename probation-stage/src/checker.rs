//! Validity checking via the pluggable container reader.

use std::path::Path;

use tracing::debug;

use probation_core::traits::{ContainerReader, ReaderFactory};

/// Wraps the configured reader collaborator. The actual reader instance
/// is created lazily on the first check and reused sequentially; it is
/// dropped on [`reset`](Self::reset) so a reconfigured stage starts with
/// a fresh one.
pub struct ValidityChecker {
    factory: Box<dyn ReaderFactory>,
    reader: Option<Box<dyn ContainerReader>>,
}

impl ValidityChecker {
    pub fn new(factory: Box<dyn ReaderFactory>) -> Self {
        Self {
            factory,
            reader: None,
        }
    }

    /// Attempt to load the file. Never propagates: reader errors and
    /// empty results both mean "not valid now".
    pub fn is_valid(&mut self, path: &Path) -> bool {
        let factory = &self.factory;
        let reader = self.reader.get_or_insert_with(|| factory.instantiate());

        let result = match reader.read(path) {
            Ok(containers) => containers > 0,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "failed to read");
                false
            }
        };
        debug!(
            path = %path.display(),
            "reading {}",
            if result { "succeeded" } else { "failed" }
        );
        result
    }

    /// Drop the lazily created reader instance.
    pub fn reset(&mut self) {
        self.reader = None;
    }
}
