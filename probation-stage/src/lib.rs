//! # probation-stage
//!
//! A pipeline stage that checks whether candidate resource files load
//! correctly and partitions each batch into three fates: immediately
//! usable (passed through), temporarily held on probation for re-checks,
//! or permanently blacklisted after the expiry window. Newly permanent
//! paths are forwarded downstream exactly once and appended to an
//! optional audit log.

pub mod audit;
pub mod checker;
pub mod interval;
pub mod registry;
pub mod snapshot;
pub mod stage;

pub use audit::{AuditLog, TIMESTAMP_FORMAT};
pub use checker::ValidityChecker;
pub use interval::IntervalSpec;
pub use registry::{FinalRecord, PathStatus, ProbationRecord, Registry};
pub use snapshot::StateSnapshot;
pub use stage::{ProbationStage, StageOutcome};
