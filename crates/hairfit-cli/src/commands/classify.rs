//! Classify command - determine face shapes and recommend hairstyles.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use hairfit_adapters::{Detector, DocumentLoader, FsLandmarkSource};
use hairfit_core::{
    classify_image, ClassificationRecord, ClassifierConfig, ClassifyOptions, FaceShapeClassifier,
    ProgressEvent, ProgressSink, ResultOutput,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Output format for records.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Hardcoded default values for calibration and loading.
mod defaults {
    pub const FOREHEAD_OFFSET: f64 = 20.0;
    pub const LOAD_ATTEMPTS: u32 = hairfit_adapters::DEFAULT_LOAD_ATTEMPTS;
}

/// Parse and validate the forehead offset (finite, non-negative).
fn parse_offset(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a non-negative number"))
    }
}

/// Shared arguments for classification.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ClassifyArgs {
    /// Landmark documents or directories to classify
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Forehead offset above the eyes, in landmark units
    #[arg(long, value_parser = parse_offset)]
    pub forehead_offset: Option<f64>,

    /// Disable per-rule score tracing (visible with -vvv)
    #[arg(long)]
    pub no_trace: bool,

    /// Include measurements, scores and decision in output
    #[arg(long)]
    pub explain: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl ClassifyArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// For boolean flags: CLI flags always win. Config can enable/disable
    /// only when the CLI flag wasn't explicitly set.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.forehead_offset = args.forehead_offset.or(config.classifier.forehead_offset);

        // CLI --no-trace wins, then config.classifier.trace (inverted)
        if !args.no_trace {
            if let Some(trace) = config.classifier.trace {
                args.no_trace = !trace;
            }
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.explain {
            args.explain = config.output.explain.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Store config for the classifier factors and detector settings
        args.config = Some(config.clone());

        args
    }

    /// Get forehead offset with fallback to hardcoded default.
    fn forehead_offset(&self) -> f64 {
        self.forehead_offset.unwrap_or(defaults::FOREHEAD_OFFSET)
    }

    /// Get detector load attempts with fallback to hardcoded default.
    fn load_attempts(&self) -> u32 {
        self.config
            .as_ref()
            .and_then(|c| c.detector.load_attempts)
            .unwrap_or(defaults::LOAD_ATTEMPTS)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }

    /// Build the classifier configuration from merged args.
    fn classifier_config(&self) -> ClassifierConfig {
        let base = ClassifierConfig::default();
        let classifier = self.config.as_ref().map(|c| &c.classifier);

        let eye = classifier
            .and_then(|c| c.forehead_eye_factor)
            .unwrap_or(base.forehead_eye_factor);
        let face = classifier
            .and_then(|c| c.forehead_face_factor)
            .unwrap_or(base.forehead_face_factor);
        let upper = classifier
            .and_then(|c| c.upper_face_factor)
            .unwrap_or(base.upper_face_factor);

        base.with_forehead_offset(self.forehead_offset())
            .with_forehead_factors(eye, face)
            .with_upper_face_factor(upper)
            .with_trace(!self.no_trace)
    }
}

/// Result of running the classify command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ClassifyResult {
    /// Number of inputs that produced a record.
    pub processed: usize,
    /// Number of inputs skipped because their landmarks could not be read.
    pub skipped: usize,
    /// Number of records without a face shape.
    pub unclassified: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the classify command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub async fn run(args: &ClassifyArgs) -> Result<ClassifyResult> {
    info!("Running classify command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let source = FsLandmarkSource::new(args.paths.clone(), args.recursive);
    let files = source.files();

    let detector = Detector::new(DocumentLoader, args.load_attempts());
    detector.load().await?;

    let config = args.classifier_config();
    debug!("Classifier config: {config:?}");
    let classifier = FaceShapeClassifier::new(config);

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(Some(files.len() as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout();

    process_files(&files, &detector, &classifier, &output, &progress_bar, args).await
}

/// Classify every landmark document in order.
async fn process_files(
    files: &[PathBuf],
    detector: &Detector<DocumentLoader>,
    classifier: &FaceShapeClassifier,
    output: &JsonOutput,
    progress: &ProgressBar,
    args: &ClassifyArgs,
) -> Result<ClassifyResult> {
    let total = Some(files.len());
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut unclassified = 0usize;
    let mut all_records: Vec<ClassificationRecord> = Vec::new();

    for (index, file) in files.iter().enumerate() {
        let path = file.to_string_lossy().into_owned();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let options = ClassifyOptions {
            explain: args.explain,
            timestamp: iso_timestamp(),
        };

        let record = match classify_image(detector, classifier, file, &options).await {
            Ok(record) => record,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        if !record.is_classified() {
            unclassified += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            record: record.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => output.write(&record)?,
            OutputFormat::Json => all_records.push(record),
        }

        processed += 1;
    }

    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_records, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if unclassified + skipped > 0 {
        ExitCode::Unclassified
    } else {
        ExitCode::Success
    };

    Ok(ClassifyResult {
        processed,
        skipped,
        unclassified,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
