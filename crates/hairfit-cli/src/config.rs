//! Configuration file support for hairfit.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/hairfit/config.toml` (lowest priority)
//! - Project-local: `.hairfit.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Classifier calibration.
    pub classifier: ClassifierSection,
    /// Output formatting settings.
    pub output: OutputConfig,
    /// Landmark detector settings.
    pub detector: DetectorConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Classifier calibration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    /// Forehead offset above the eyes, in landmark units.
    pub forehead_offset: Option<f64>,
    /// Eye span multiplier in the forehead width estimate.
    pub forehead_eye_factor: Option<f64>,
    /// Face width multiplier in the forehead width estimate.
    pub forehead_face_factor: Option<f64>,
    /// Face width multiplier for the upper face width.
    pub upper_face_factor: Option<f64>,
    /// Emit per-rule score events.
    pub trace: Option<bool>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include measurements, scores and decision.
    pub explain: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

/// Landmark detector configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Attempts to load the detector before giving up.
    pub load_attempts: Option<u32>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/hairfit/config.toml`
    /// 2. Project-local: `.hairfit.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(v) = self.classifier.forehead_offset {
            if !(v.is_finite() && v >= 0.0) {
                return Err(format!(
                    "classifier.forehead_offset must be non-negative, got {v}"
                ));
            }
        }

        let factors = [
            ("forehead_eye_factor", self.classifier.forehead_eye_factor),
            ("forehead_face_factor", self.classifier.forehead_face_factor),
            ("upper_face_factor", self.classifier.upper_face_factor),
        ];
        for (name, value) in factors {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(format!("classifier.{name} must be positive, got {v}"));
                }
            }
        }

        if self.detector.load_attempts == Some(0) {
            return Err("detector.load_attempts must be at least 1, got 0".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Classifier
        let classifier = &mut self.classifier;
        classifier.forehead_offset = other
            .classifier
            .forehead_offset
            .or(classifier.forehead_offset);
        classifier.forehead_eye_factor = other
            .classifier
            .forehead_eye_factor
            .or(classifier.forehead_eye_factor);
        classifier.forehead_face_factor = other
            .classifier
            .forehead_face_factor
            .or(classifier.forehead_face_factor);
        classifier.upper_face_factor = other
            .classifier
            .upper_face_factor
            .or(classifier.upper_face_factor);
        classifier.trace = other.classifier.trace.or(classifier.trace);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.explain = other.output.explain.or(self.output.explain);
        self.output.progress = other.output.progress.or(self.output.progress);

        // Detector
        self.detector.load_attempts = other
            .detector
            .load_attempts
            .or(self.detector.load_attempts);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hairfit").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.hairfit.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".hairfit.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
