// Test utility module for gapmap integration tests
#![allow(dead_code)]

use assert_cmd::Command;
use gapmap::core::{School, TravelMode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A school with only an id and a name; every measure unreported.
pub fn school(id: &str, name: &str) -> School {
    School {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

/// Fixture dataset used by the CLI tests.
///
/// At the 0-30k bracket the reported gaps sort as 2, 1, 4, 6, 3; school 5
/// has no gap for that bracket.
pub fn sample_schools() -> Vec<School> {
    vec![
        School {
            city: Some("Easton".into()),
            state: Some("PA".into()),
            control: Some(2),
            cost_of_attendance: Some(78000.0),
            gap_0_30k: Some(0.0),
            no_loan_policy: true,
            travel_type: Some(TravelMode::Drive),
            annual_travel_cost: Some(1200.0),
            grad_rate_4yr: Some(0.85),
            grad_rate_pell: Some(0.82),
            ..school("1", "Free Tech")
        },
        School {
            city: Some("Bethlehem".into()),
            state: Some("PA".into()),
            control: Some(2),
            cost_of_attendance: Some(80000.0),
            gap_0_30k: Some(-4000.0),
            gap_110k_plus: Some(-1500.0),
            travel_type: Some(TravelMode::Drive),
            annual_travel_cost: Some(800.0),
            gap_severity: Some(gapmap::core::SeverityTag::Critical),
            ..school("2", "Generous College")
        },
        School {
            city: Some("Los Angeles".into()),
            state: Some("CA".into()),
            control: Some(2),
            gap_0_30k: Some(18000.0),
            travel_type: Some(TravelMode::Fly),
            annual_travel_cost: Some(2500.0),
            website_url: Some("pricey.example.edu".into()),
            ..school("3", "Pricey University")
        },
        School {
            city: Some("Albany".into()),
            state: Some("NY".into()),
            control: Some(1),
            gap_0_30k: Some(5000.0),
            ..school("4", "Middle State")
        },
        School {
            state: Some("PA".into()),
            ..school("5", "Unknown Gap College")
        },
        School {
            city: Some("Scranton".into()),
            state: Some("PA".into()),
            gap_0_30k: Some(9000.0),
            ..school("6", "Mid College")
        },
    ]
}

/// Write `schools` as a JSON array export and return its path.
pub fn write_dataset(dir: &Path, schools: &[School]) -> PathBuf {
    let path = dir.join("schools.json");
    let json = serde_json::to_string_pretty(schools).expect("serialize fixture");
    std::fs::write(&path, json).expect("write fixture");
    path
}

/// Scratch directory holding the sample dataset and a state file path.
pub struct Workspace {
    pub dir: TempDir,
    pub data: PathBuf,
    pub state: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let data = write_dataset(dir.path(), &sample_schools());
        let state = dir.path().join("state.json");
        Self { dir, data, state }
    }

    /// The binary, isolated from the caller's environment and config files.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gapmap").expect("gapmap binary");
        cmd.current_dir(self.dir.path())
            .env_remove("GAPMAP_DATA")
            .env_remove("GAPMAP_REMOTE")
            .env_remove("GAPMAP_STATE_FILE")
            .env_remove("GAPMAP_API_KEY")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("--plain");
        cmd
    }

    /// [`Workspace::command`] pointed at the sample dataset and state file
    pub fn gapmap(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--data")
            .arg(&self.data)
            .arg("--state")
            .arg(&self.state);
        cmd
    }

    pub fn stdout_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.gapmap().args(args).output().expect("run gapmap");
        assert!(
            output.status.success(),
            "gapmap {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
