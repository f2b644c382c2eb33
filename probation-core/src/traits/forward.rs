//! Downstream notification channel for permanently blacklisted paths.

use crate::batch::{ElementKind, PathToken};

/// Receives one single-item token per path promoted to the permanent
/// blacklist, exactly once per path across the stage's lifetime.
pub trait ForwardSink {
    /// Element kinds this sink accepts. Checked once at setup; a sink
    /// that accepts neither kind the stage may emit is a fatal
    /// configuration error.
    fn accepts(&self) -> &[ElementKind];

    /// Consume a newly blacklisted path. An error here is surfaced to the
    /// caller per item; the stage continues with the remaining items.
    fn forward(&mut self, token: &PathToken) -> Result<(), String>;
}
