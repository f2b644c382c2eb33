//! Save/restore of tracking state around reconfiguration.
//!
//! A reconfiguration resets the stage, which clears both registries. The
//! surrounding engine captures a snapshot first and restores it after, so
//! in-flight probation history and the permanent blacklist survive. The
//! two tiers are distinct slots: restoring never maps one onto the other.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use probation_core::batch::CandidatePath;

use crate::registry::{FinalRecord, ProbationRecord, Registry};

/// In-process snapshot of both registries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub probation: HashMap<CandidatePath, ProbationRecord>,
    pub permanent: HashMap<CandidatePath, FinalRecord>,
}

impl StateSnapshot {
    /// Capture the current state of a registry.
    pub fn capture(registry: &Registry) -> Self {
        let (probation, permanent) = registry.parts();
        Self {
            probation: probation.clone(),
            permanent: permanent.clone(),
        }
    }

    /// Reinstate both slots into the registry, replacing its contents.
    pub fn restore_into(self, registry: &mut Registry) {
        registry.replace_parts(self.probation, self.permanent);
    }
}
