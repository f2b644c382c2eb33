//! Append-only audit log of permanently blacklisted paths.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::warn;

use probation_core::batch::CandidatePath;

/// Shared timestamp format for the Added and Expired columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADER: &str = "File\tAdded\tExpired\n";

/// Plain-text tab-separated log, one line per promotion. Disabled when no
/// target is configured or the target is a directory. Writes are best
/// effort: a failed append is logged and otherwise ignored, promotion and
/// forwarding do not depend on it.
#[derive(Debug, Clone)]
pub struct AuditLog {
    target: Option<PathBuf>,
}

impl AuditLog {
    pub fn new(target: Option<PathBuf>) -> Self {
        Self { target }
    }

    pub fn disabled() -> Self {
        Self { target: None }
    }

    pub fn is_enabled(&self) -> bool {
        match &self.target {
            Some(target) => !target.is_dir(),
            None => false,
        }
    }

    /// Append one entry. Writes the header first if the log file does not
    /// exist yet.
    pub fn record(
        &self,
        path: &CandidatePath,
        added_at: DateTime<Utc>,
        promoted_at: DateTime<Utc>,
    ) {
        let Some(target) = &self.target else {
            return;
        };
        if target.is_dir() {
            return;
        }

        let mut chunk = String::new();
        if !target.exists() {
            chunk.push_str(HEADER);
        }
        chunk.push_str(&format!(
            "{}\t{}\t{}\n",
            path,
            added_at.format(TIMESTAMP_FORMAT),
            promoted_at.format(TIMESTAMP_FORMAT),
        ));

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(target)
            .and_then(|mut file| file.write_all(chunk.as_bytes()));
        if let Err(e) = written {
            warn!(log = %target.display(), error = %e, "audit log write failed");
        }
    }
}
