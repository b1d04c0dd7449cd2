use std::fs;
use std::path::{Path, PathBuf};

use dt_core::DialogueError;
use dt_validator::{
    fix_document, read_document, validate_directory, validate_file, FileReport, ValidationSummary,
    ValidatorConfig,
};

use crate::{CliFailure, OutputLevel, ValidateArgs};

pub(crate) fn validator_config(args: &ValidateArgs) -> Result<ValidatorConfig, DialogueError> {
    let mut config = ValidatorConfig::load(args.schema.as_deref().map(Path::new))?;
    if let Some(pattern) = &args.pattern {
        config = config.with_pattern(pattern.clone());
    }
    if let Some(version) = &args.expected_version {
        config = config.with_expected_schema_version(version.clone());
    }
    Ok(config)
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<i32, DialogueError> {
    let level = OutputLevel::from_flags(args.verbose, args.quiet);
    let config = validator_config(&args)?;

    let reports = match (&args.file, &args.dir) {
        (Some(file), _) => vec![validate_file(Path::new(file), &config)],
        (None, Some(dir)) => validate_directory(Path::new(dir), &config)?,
        (None, None) => {
            return Err(DialogueError::new(
                "CLI_VALIDATE_SOURCE",
                "Either --file or --dir is required.",
            ))
        }
    };

    if level != OutputLevel::Quiet {
        for report in &reports {
            for line in render_file_report(report)? {
                println!("{}", line);
            }
        }
    }

    if args.fix {
        let output_dir = args.output_dir.as_deref().map(Path::new);
        let candidates = fix_candidates(&args, &reports);
        for path in candidates {
            for line in fix_one(&path, output_dir, &config)? {
                println!("{}", line);
            }
        }
    }

    for line in render_summary(&ValidationSummary::from_reports(&reports), level) {
        println!("{}", line);
    }

    Ok(if reports.iter().all(FileReport::is_valid) {
        0
    } else {
        1
    })
}

/// A single file is always upgraded; in directory mode only invalid files
/// are, and only when an output directory is given.
fn fix_candidates(args: &ValidateArgs, reports: &[FileReport]) -> Vec<PathBuf> {
    if let Some(file) = &args.file {
        return vec![PathBuf::from(file)];
    }
    if args.output_dir.is_none() {
        log::warn!("--fix with --dir needs --output-dir; no files were fixed");
        return Vec::new();
    }
    reports
        .iter()
        .filter(|report| !report.is_valid())
        .map(|report| PathBuf::from(&report.path))
        .collect()
}

fn fix_one(
    path: &Path,
    output_dir: Option<&Path>,
    config: &ValidatorConfig,
) -> Result<Vec<String>, DialogueError> {
    let mut out = Vec::new();
    let outcome = match read_document(path).and_then(|document| fix_document(&document, config)) {
        Ok(outcome) => outcome,
        Err(error) => {
            log::warn!("cannot fix {}: {}", path.display(), error);
            out.push(format!("FIX_FAILED:{}", path.display()));
            return Ok(out);
        }
    };

    for suggestion in &outcome.suggestions {
        out.push(format!(
            "SUGGESTION_JSON:{}",
            serde_json::to_string(suggestion)
                .map_err(|error| CliFailure::OutputSerialize.wrap(error))?
        ));
    }
    if !outcome.is_schema_valid() {
        out.push(format!("FIX_FAILED:{}", path.display()));
        return Ok(out);
    }

    let target = fixed_output_path(path, output_dir);
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| CliFailure::OutputWrite.at(parent, error))?;
    }
    let payload = serde_json::to_string_pretty(&outcome.document)
        .map_err(|error| CliFailure::OutputSerialize.wrap(error))?;
    fs::write(&target, payload).map_err(|error| CliFailure::OutputWrite.at(&target, error))?;
    log::info!("fixed document written to {}", target.display());
    out.push(format!("FIXED:{}", target.display()));
    Ok(out)
}

/// `<dir>/<file name>` with an output directory, else `<stem>_fixed.<ext>`
/// next to the input.
pub(crate) fn fixed_output_path(path: &Path, output_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = output_dir {
        if let Some(name) = path.file_name() {
            return dir.join(name);
        }
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_fixed.{}", stem, ext.to_string_lossy()),
        None => format!("{}_fixed", stem),
    };
    path.with_file_name(name)
}

pub(crate) fn render_file_report(report: &FileReport) -> Result<Vec<String>, DialogueError> {
    let status = if report.is_valid() { "VALID" } else { "INVALID" };
    let mut out = vec![format!("FILE:{}|{}", report.path, status)];
    for diagnostic in &report.errors {
        out.push(format!(
            "ERROR:{}|{}",
            diagnostic.code,
            serde_json::to_string(&diagnostic.message)
                .map_err(|error| CliFailure::OutputSerialize.wrap(error))?
        ));
    }
    for diagnostic in &report.warnings {
        out.push(format!(
            "WARNING:{}|{}",
            diagnostic.code,
            serde_json::to_string(&diagnostic.message)
                .map_err(|error| CliFailure::OutputSerialize.wrap(error))?
        ));
    }
    Ok(out)
}

pub(crate) fn render_summary(summary: &ValidationSummary, level: OutputLevel) -> Vec<String> {
    let mut out = vec![format!(
        "SUMMARY:checked={}|valid={}|invalid={}|valid_percent={:.1}",
        summary.files_checked,
        summary.files_valid,
        summary.files_invalid,
        summary.valid_percent()
    )];
    for (code, count) in &summary.errors_by_code {
        out.push(format!("ERROR_STAT:{}={}", code, count));
    }
    if level == OutputLevel::Verbose {
        for (code, count) in &summary.warnings_by_code {
            out.push(format!("WARNING_STAT:{}={}", code, count));
        }
    }
    out
}
