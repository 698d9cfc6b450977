//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

/// Get path to test fixtures
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("hairfit-adapters/tests/fixtures")
}

/// Layout with separate XDG config home and project directory.
struct Sandbox {
    _root: tempfile::TempDir,
    xdg: PathBuf,
    project: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let xdg = root.path().join("xdg");
        let project = root.path().join("project");
        fs::create_dir_all(xdg.join("hairfit")).unwrap();
        fs::create_dir_all(&project).unwrap();
        Self {
            _root: root,
            xdg,
            project,
        }
    }

    fn xdg_config(&self, toml: &str) -> &Self {
        fs::write(self.xdg.join("hairfit/config.toml"), toml).unwrap();
        self
    }

    fn project_config(&self, toml: &str) -> &Self {
        fs::write(self.project.join(".hairfit.toml"), toml).unwrap();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("hairfit").unwrap();
        cmd.env("XDG_CONFIG_HOME", &self.xdg)
            .current_dir(&self.project);
        cmd
    }

    fn project_dir(&self) -> &Path {
        &self.project
    }
}

#[test]
fn test_defaults_without_config() {
    let sandbox = Sandbox::new();
    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("details").not());
}

#[test]
fn test_project_config_applies_format() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[output]
format = 'json'
",
    );

    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_project_config_found_from_subdirectory() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[output]
format = 'json'
",
    );
    let sub = sandbox.project_dir().join("photos/today");
    fs::create_dir_all(&sub).unwrap();

    sandbox
        .command()
        .current_dir(&sub)
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_xdg_config_applies() {
    let sandbox = Sandbox::new();
    sandbox.xdg_config(
        r"
[output]
explain = true
",
    );

    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"details\""));
}

#[test]
fn test_project_config_overrides_xdg() {
    let sandbox = Sandbox::new();
    sandbox
        .xdg_config(
            r"
[output]
format = 'json'
explain = true
",
        )
        .project_config(
            r"
[output]
format = 'jsonl'
",
        );

    // Format comes from the project, explain survives from XDG
    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"details\""));
}

#[test]
fn test_cli_format_overrides_config() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[output]
format = 'json'
",
    );

    sandbox
        .command()
        .arg("--format")
        .arg("jsonl")
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_config_forehead_offset_and_cli_override() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[classifier]
forehead_offset = 30.0

[output]
explain = true
",
    );

    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .stdout(predicate::str::contains("\"forehead_top\":120.0"));

    sandbox
        .command()
        .args(["--forehead-offset", "10"])
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .stdout(predicate::str::contains("\"forehead_top\":140.0"));
}

#[test]
fn test_config_recursive() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[general]
recursive = true
",
    );
    let nested = sandbox.project_dir().join("batch/nested");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(fixtures_dir().join("oval.json"), nested.join("oval.json")).unwrap();

    sandbox
        .command()
        .arg(sandbox.project_dir().join("batch"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"face_shape\":\"oval\""));
}

#[test]
fn test_invalid_config_value_warns() {
    let sandbox = Sandbox::new();
    sandbox.project_config(
        r"
[output]
format = 'xml'
",
    );

    // Unknown format falls back to JSONL with a warning
    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("output.format"))
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_unparseable_config_is_ignored() {
    let sandbox = Sandbox::new();
    sandbox.project_config("[output\nformat = 'json'\n");

    sandbox
        .command()
        .arg(fixtures_dir().join("oval.json"))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Failed to parse config file"))
        .stdout(predicate::str::starts_with("{"));
}
