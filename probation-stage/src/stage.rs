//! The probation stage: per-batch classification, re-checks, promotion,
//! and downstream notification.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use probation_core::batch::{CandidatePath, ElementKind, PathToken};
use probation_core::config::StageConfig;
use probation_core::errors::{ConfigError, StageError};
use probation_core::traits::{Cancellable, Clock, ForwardSink, ReaderFactory, SystemClock};

use crate::audit::AuditLog;
use crate::checker::ValidityChecker;
use crate::interval::IntervalSpec;
use crate::registry::{FinalRecord, PathStatus, Registry};
use crate::snapshot::StateSnapshot;

/// Result of one stage invocation.
///
/// Forward failures are collected here rather than aborting the batch, so
/// every promoted path still gets its notification attempt. The caller's
/// error policy decides what a non-empty `errors` list means.
#[derive(Debug, Default)]
pub struct StageOutcome {
    /// Pass-through token mirroring the input shape. `None` when no path
    /// was valid; an empty sequence is never emitted.
    pub output: Option<PathToken>,
    /// Paths promoted to the permanent blacklist this invocation, in
    /// batch order.
    pub promoted: Vec<CandidatePath>,
    /// Non-fatal per-item errors (forward failures).
    pub errors: Vec<StageError>,
}

impl StageOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrates the validity checker, the two-tier registry, the interval
/// policies, the audit log, and the forward sink over one batch at a time.
/// Single-threaded sequential use only.
pub struct ProbationStage {
    checker: ValidityChecker,
    expiry: IntervalSpec,
    check: IntervalSpec,
    registry: Registry,
    audit: AuditLog,
    sink: Option<Box<dyn ForwardSink>>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for ProbationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbationStage")
            .field("expiry", &self.expiry)
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}

impl ProbationStage {
    /// Build a stage from the reader delegate and configuration. Both
    /// interval specs are parsed here; a bad spec refuses to start.
    pub fn new(reader: Box<dyn ReaderFactory>, config: &StageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            checker: ValidityChecker::new(reader),
            expiry: IntervalSpec::parse(&config.expiry_interval)?,
            check: IntervalSpec::parse(&config.check_interval)?,
            registry: Registry::default(),
            audit: AuditLog::new(config.log.clone()),
            sink: None,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the time source. Tests drive the stage with a
    /// [`ManualClock`](probation_core::traits::ManualClock).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach the downstream sink for newly permanent paths.
    ///
    /// The sink must accept both element kinds, since batches may arrive
    /// in either representation over the stage's lifetime. Incompatibility
    /// is fatal at setup, not at runtime.
    pub fn attach_sink(&mut self, sink: Box<dyn ForwardSink>) -> Result<(), ConfigError> {
        for kind in [ElementKind::Text, ElementKind::Path] {
            if !sink.accepts().contains(&kind) {
                return Err(ConfigError::IncompatibleSink { missing: kind });
            }
        }
        self.sink = Some(sink);
        Ok(())
    }

    /// Process one batch.
    ///
    /// Paths are handled in original order. Cancellation is honored
    /// between paths: the whole provisional output for this batch is
    /// discarded, while registry transitions already applied stand.
    pub fn execute(
        &mut self,
        token: &PathToken,
        cancel: &dyn Cancellable,
    ) -> Result<StageOutcome, StageError> {
        let now = self.clock.now();
        let (shape, paths) = token.decompose();

        let mut valid: Vec<CandidatePath> = Vec::new();
        let mut promoted: Vec<(CandidatePath, FinalRecord)> = Vec::new();

        for path in paths {
            if cancel.is_cancelled() {
                debug!("cancelled mid-batch, discarding provisional output");
                return Err(StageError::Cancelled);
            }

            match self.registry.classify(&path) {
                PathStatus::Permanent => {
                    debug!(path = %path, "permanently blacklisted, skipped");
                }
                PathStatus::InProbation => {
                    self.process_probated(path, now, &mut valid, &mut promoted);
                }
                PathStatus::Untracked => {
                    self.process_untracked(path, now, &mut valid);
                }
            }
        }

        let mut outcome = StageOutcome {
            output: shape.recompose(&valid),
            promoted: Vec::with_capacity(promoted.len()),
            errors: Vec::new(),
        };

        // One audit line and one forward call per promotion, in order.
        for (path, record) in promoted {
            self.audit.record(&path, record.added_at, record.promoted_at);
            if let Some(sink) = self.sink.as_mut() {
                let single = shape.single(&path);
                if let Err(reason) = sink.forward(&single) {
                    outcome.errors.push(StageError::Forward {
                        path: path.to_text(),
                        reason,
                    });
                }
            }
            outcome.promoted.push(path);
        }

        Ok(outcome)
    }

    fn process_probated(
        &mut self,
        path: CandidatePath,
        now: DateTime<Utc>,
        valid: &mut Vec<CandidatePath>,
        promoted: &mut Vec<(CandidatePath, FinalRecord)>,
    ) {
        let Some(record) = self.registry.probation_record(&path) else {
            return;
        };
        if now <= record.next_check_at {
            debug!(path = %path, "on probation, not due for re-check");
            return;
        }
        let added_at = record.added_at;

        if self.checker.is_valid(path.as_path()) {
            self.registry.recover(&path);
            info!(path = %path, "recovered, removed from probation");
            valid.push(path);
        } else if now > self.expiry.deadline(added_at) {
            if let Some(frozen) = self.registry.promote(&path, now) {
                info!(path = %path, "expired, moved to permanent blacklist");
                promoted.push((path, frozen));
            }
        } else {
            self.registry
                .reschedule(&path, self.next_check_deadline(now));
            debug!(path = %path, "still failing, kept on probation");
        }
    }

    fn process_untracked(
        &mut self,
        path: CandidatePath,
        now: DateTime<Utc>,
        valid: &mut Vec<CandidatePath>,
    ) {
        if self.checker.is_valid(path.as_path()) {
            debug!(path = %path, "valid");
            valid.push(path);
        } else {
            debug!(path = %path, "added to probation");
            self.registry
                .start_probation(path, now, self.next_check_deadline(now));
        }
    }

    /// The re-check deadline is never in the past relative to the instant
    /// it was computed, even for a zero-length check interval.
    fn next_check_deadline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.check.deadline(now).max(now)
    }

    /// Where a candidate path currently stands.
    pub fn status(&self, path: &CandidatePath) -> PathStatus {
        self.registry.classify(path)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Capture both registries as independent snapshot slots.
    pub fn backup_state(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.registry)
    }

    /// Reinstate a previously captured snapshot.
    pub fn restore_state(&mut self, snapshot: StateSnapshot) {
        snapshot.restore_into(&mut self.registry);
    }

    /// Reconfiguration reset: drop all tracking state and the lazily
    /// created reader instance. Callers that need history to survive wrap
    /// this in [`backup_state`](Self::backup_state) /
    /// [`restore_state`](Self::restore_state).
    pub fn reset(&mut self) {
        self.registry.clear();
        self.checker.reset();
    }
}
