//! Shared fixtures for the stage integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use probation_core::batch::{ElementKind, PathToken};
use probation_core::errors::ReadError;
use probation_core::traits::{ContainerReader, ForwardSink, ManualClock, ReaderFactory};
use probation_core::StageConfig;
use probation_stage::ProbationStage;

/// Reference instant all tests anchor at.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Switchboard deciding which paths currently load, shared between the
/// test body and the reader instances the stage creates.
#[derive(Clone, Default)]
pub struct FileFixture {
    valid: Arc<Mutex<HashSet<PathBuf>>>,
    reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl FileFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_valid(&self, path: &str, valid: bool) {
        let mut set = self.valid.lock().unwrap();
        if valid {
            set.insert(PathBuf::from(path));
        } else {
            set.remove(Path::new(path));
        }
    }

    /// How many read attempts were made against `path`.
    pub fn read_count(&self, path: &str) -> usize {
        let target = Path::new(path);
        self.reads.lock().unwrap().iter().filter(|p| p == &target).count()
    }

    pub fn total_reads(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn factory(&self) -> Box<dyn ReaderFactory> {
        let fixture = self.clone();
        Box::new(move || -> Box<dyn ContainerReader> {
            Box::new(FixtureReader {
                fixture: fixture.clone(),
            })
        })
    }
}

struct FixtureReader {
    fixture: FileFixture,
}

impl ContainerReader for FixtureReader {
    fn read(&mut self, path: &Path) -> Result<usize, ReadError> {
        self.fixture.reads.lock().unwrap().push(path.to_path_buf());
        if self.fixture.valid.lock().unwrap().contains(path) {
            Ok(1)
        } else {
            Err(ReadError::Malformed {
                path: path.to_path_buf(),
                reason: "unreadable in fixture".to_string(),
            })
        }
    }
}

/// Forward sink that records every token it receives. Optionally rejects
/// tokens whose text contains `fail_matching`.
#[derive(Clone)]
pub struct CollectingSink {
    accepted: Vec<ElementKind>,
    pub received: Arc<Mutex<Vec<PathToken>>>,
    fail_matching: Option<String>,
}

impl CollectingSink {
    pub fn accepting_both() -> Self {
        Self {
            accepted: vec![ElementKind::Text, ElementKind::Path],
            received: Arc::new(Mutex::new(Vec::new())),
            fail_matching: None,
        }
    }

    pub fn accepting(kinds: &[ElementKind]) -> Self {
        Self {
            accepted: kinds.to_vec(),
            received: Arc::new(Mutex::new(Vec::new())),
            fail_matching: None,
        }
    }

    pub fn failing_on(substring: &str) -> Self {
        Self {
            fail_matching: Some(substring.to_string()),
            ..Self::accepting_both()
        }
    }

    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl ForwardSink for CollectingSink {
    fn accepts(&self) -> &[ElementKind] {
        &self.accepted
    }

    fn forward(&mut self, token: &PathToken) -> Result<(), String> {
        if let Some(needle) = &self.fail_matching {
            let text = match token {
                PathToken::Text(s) => s.clone(),
                PathToken::Path(p) => p.to_string_lossy().into_owned(),
                other => format!("{other:?}"),
            };
            if text.contains(needle) {
                return Err(format!("sink refused '{text}'"));
            }
        }
        self.received.lock().unwrap().push(token.clone());
        Ok(())
    }
}

/// A stage wired to the fixture reader and a manual clock starting at
/// [`t0`], with the given interval specs.
pub fn make_stage(fixture: &FileFixture, expiry: &str, check: &str) -> (ProbationStage, ManualClock) {
    let config = StageConfig {
        expiry_interval: expiry.to_string(),
        check_interval: check.to_string(),
        log: None,
    };
    let clock = ManualClock::new(t0());
    let stage = ProbationStage::new(fixture.factory(), &config)
        .expect("valid test config")
        .with_clock(Box::new(clock.clone()));
    (stage, clock)
}
