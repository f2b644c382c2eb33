//! Two-tier blacklist state.
//!
//! A candidate path is tracked in at most one of two maps: the probation
//! map (failed at least once, still eligible for recovery) or the
//! permanent blacklist (expired while still failing; terminal). Promotion
//! moves the record, it never copies, so the mutual exclusion of the two
//! tiers holds by construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use probation_core::batch::CandidatePath;

/// Tracking record for a path on probation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationRecord {
    /// Instant the path first failed validation. Immutable.
    pub added_at: DateTime<Utc>,
    /// Earliest instant the path should be re-checked.
    pub next_check_at: DateTime<Utc>,
}

/// A probation record frozen at the moment of promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    pub added_at: DateTime<Utc>,
    pub promoted_at: DateTime<Utc>,
}

/// Where a candidate path currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Untracked,
    InProbation,
    Permanent,
}

/// The two registries, owned by one stage instance.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    probation: HashMap<CandidatePath, ProbationRecord>,
    permanent: HashMap<CandidatePath, FinalRecord>,
}

impl Registry {
    pub fn classify(&self, path: &CandidatePath) -> PathStatus {
        if self.permanent.contains_key(path) {
            PathStatus::Permanent
        } else if self.probation.contains_key(path) {
            PathStatus::InProbation
        } else {
            PathStatus::Untracked
        }
    }

    pub fn probation_record(&self, path: &CandidatePath) -> Option<&ProbationRecord> {
        self.probation.get(path)
    }

    pub fn final_record(&self, path: &CandidatePath) -> Option<&FinalRecord> {
        self.permanent.get(path)
    }

    /// Begin tracking a freshly failed path.
    pub fn start_probation(
        &mut self,
        path: CandidatePath,
        added_at: DateTime<Utc>,
        next_check_at: DateTime<Utc>,
    ) {
        debug_assert_eq!(self.classify(&path), PathStatus::Untracked);
        self.probation.insert(
            path,
            ProbationRecord {
                added_at,
                next_check_at,
            },
        );
    }

    /// Push the next re-check deadline out for a path that failed again
    /// but has not yet expired.
    pub fn reschedule(&mut self, path: &CandidatePath, next_check_at: DateTime<Utc>) {
        if let Some(record) = self.probation.get_mut(path) {
            record.next_check_at = next_check_at;
        }
    }

    /// Remove a path that loaded correctly again.
    pub fn recover(&mut self, path: &CandidatePath) -> Option<ProbationRecord> {
        self.probation.remove(path)
    }

    /// Move a path from probation to the permanent blacklist, freezing its
    /// record. Returns the frozen record, or `None` if the path was not on
    /// probation.
    pub fn promote(
        &mut self,
        path: &CandidatePath,
        promoted_at: DateTime<Utc>,
    ) -> Option<FinalRecord> {
        let record = self.probation.remove(path)?;
        let frozen = FinalRecord {
            added_at: record.added_at,
            promoted_at,
        };
        self.permanent.insert(path.clone(), frozen);
        Some(frozen)
    }

    pub fn probation_len(&self) -> usize {
        self.probation.len()
    }

    pub fn permanent_len(&self) -> usize {
        self.permanent.len()
    }

    /// Drop all tracking state. Used on reconfiguration resets; callers
    /// that need to survive a reset snapshot the state first.
    pub fn clear(&mut self) {
        self.probation.clear();
        self.permanent.clear();
    }

    pub(crate) fn parts(
        &self,
    ) -> (
        &HashMap<CandidatePath, ProbationRecord>,
        &HashMap<CandidatePath, FinalRecord>,
    ) {
        (&self.probation, &self.permanent)
    }

    pub(crate) fn replace_parts(
        &mut self,
        probation: HashMap<CandidatePath, ProbationRecord>,
        permanent: HashMap<CandidatePath, FinalRecord>,
    ) {
        self.probation = probation;
        self.permanent = permanent;
    }
}
