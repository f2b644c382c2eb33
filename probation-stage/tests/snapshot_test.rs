mod common;

use std::collections::HashMap;

use chrono::Duration;

use common::{make_stage, t0, FileFixture};
use probation_core::batch::{CandidatePath, PathToken};
use probation_core::traits::NeverCancelled;
use probation_stage::{FinalRecord, PathStatus, ProbationRecord, StateSnapshot};

const A: &str = "/data/spectra/a.csv";
const B: &str = "/data/spectra/b.csv";

fn key(path: &str) -> CandidatePath {
    CandidatePath::new(path)
}

// ── Backup / restore around a reconfiguration reset ──────────────────────

#[test]
fn state_survives_reset_via_snapshot() {
    let fixture = FileFixture::new();
    let (mut stage, clock) = make_stage(&fixture, "START +1 MINUTE", "START +1 MINUTE");

    // A ends up permanent, B stays on probation.
    stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();
    clock.set(t0() + Duration::minutes(5));
    stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();
    stage.execute(&PathToken::Text(B.to_string()), &NeverCancelled).unwrap();
    assert_eq!(stage.status(&key(A)), PathStatus::Permanent);
    assert_eq!(stage.status(&key(B)), PathStatus::InProbation);

    let probation_before = stage.registry().probation_record(&key(B)).copied();
    let permanent_before = stage.registry().final_record(&key(A)).copied();

    // Reconfiguration: backup, reset, restore.
    let snapshot = stage.backup_state();
    stage.reset();
    assert_eq!(stage.status(&key(A)), PathStatus::Untracked);
    assert_eq!(stage.status(&key(B)), PathStatus::Untracked);

    stage.restore_state(snapshot);
    assert_eq!(stage.status(&key(A)), PathStatus::Permanent);
    assert_eq!(stage.status(&key(B)), PathStatus::InProbation);
    assert_eq!(stage.registry().probation_record(&key(B)).copied(), probation_before);
    assert_eq!(stage.registry().final_record(&key(A)).copied(), permanent_before);
}

#[test]
fn restored_permanent_entries_are_still_terminal() {
    let fixture = FileFixture::new();
    let (mut stage, clock) = make_stage(&fixture, "START +1 MINUTE", "START +1 MINUTE");

    stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();
    clock.set(t0() + Duration::minutes(5));
    stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();

    let snapshot = stage.backup_state();
    stage.reset();
    stage.restore_state(snapshot);

    // The file is readable now, but the restored blacklist still wins.
    fixture.set_valid(A, true);
    let reads = fixture.read_count(A);
    let outcome = stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();
    assert_eq!(outcome.output, None);
    assert_eq!(fixture.read_count(A), reads);
}

// ── The two slots are independent ────────────────────────────────────────

#[test]
fn snapshot_keeps_the_two_tiers_in_distinct_slots() {
    let snapshot = StateSnapshot {
        probation: HashMap::from([(
            key(B),
            ProbationRecord {
                added_at: t0(),
                next_check_at: t0() + Duration::minutes(15),
            },
        )]),
        permanent: HashMap::from([(
            key(A),
            FinalRecord {
                added_at: t0(),
                promoted_at: t0() + Duration::hours(25),
            },
        )]),
    };

    let fixture = FileFixture::new();
    let (mut stage, _clock) = make_stage(&fixture, "START +24 HOUR", "START +15 MINUTE");
    stage.restore_state(snapshot);

    // Restoring one tier must not clobber or absorb the other.
    assert_eq!(stage.status(&key(A)), PathStatus::Permanent);
    assert_eq!(stage.status(&key(B)), PathStatus::InProbation);
    assert_eq!(stage.registry().probation_len(), 1);
    assert_eq!(stage.registry().permanent_len(), 1);
}

#[test]
fn empty_snapshot_restores_to_empty_registries() {
    let fixture = FileFixture::new();
    let (mut stage, _clock) = make_stage(&fixture, "START +24 HOUR", "START +15 MINUTE");

    stage.execute(&PathToken::Text(A.to_string()), &NeverCancelled).unwrap();
    assert_eq!(stage.registry().probation_len(), 1);

    stage.restore_state(StateSnapshot::default());
    assert_eq!(stage.registry().probation_len(), 0);
    assert_eq!(stage.registry().permanent_len(), 0);
}
