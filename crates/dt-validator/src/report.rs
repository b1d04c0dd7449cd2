use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One validation finding. `code` groups findings for statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn error(&mut self, code: &str, message: impl Into<String>) {
        self.errors.push(Diagnostic::new(code, message));
    }

    pub fn warning(&mut self, code: &str, message: impl Into<String>) {
        self.warnings.push(Diagnostic::new(code, message));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error_code(&self, code: &str) -> bool {
        self.errors.iter().any(|diagnostic| diagnostic.code == code)
    }

    pub fn has_warning_code(&self, code: &str) -> bool {
        self.warnings.iter().any(|diagnostic| diagnostic.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, report: ValidationReport) -> Self {
        Self {
            path: path.into(),
            errors: report.errors,
            warnings: report.warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub files_checked: usize,
    pub files_valid: usize,
    pub files_invalid: usize,
    pub errors_by_code: BTreeMap<String, usize>,
    pub warnings_by_code: BTreeMap<String, usize>,
}

impl ValidationSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.files_checked += 1;
            if report.is_valid() {
                summary.files_valid += 1;
            } else {
                summary.files_invalid += 1;
            }
            for diagnostic in &report.errors {
                *summary
                    .errors_by_code
                    .entry(diagnostic.code.clone())
                    .or_insert(0) += 1;
            }
            for diagnostic in &report.warnings {
                *summary
                    .warnings_by_code
                    .entry(diagnostic.code.clone())
                    .or_insert(0) += 1;
            }
        }
        summary
    }

    /// Share of valid files in percent; zero when nothing was checked.
    pub fn valid_percent(&self) -> f64 {
        if self.files_checked == 0 {
            return 0.0;
        }
        self.files_valid as f64 * 100.0 / self.files_checked as f64
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    #[test]
    fn summary_counts_files_and_codes() {
        let mut broken = ValidationReport::default();
        broken.error("DANGLING_REFERENCE", "a");
        broken.error("DANGLING_REFERENCE", "b");
        broken.warning("CYCLE", "c");
        let mut clean = ValidationReport::default();
        clean.warning("CYCLE", "d");

        let summary = ValidationSummary::from_reports(&[
            FileReport::new("broken.json", broken),
            FileReport::new("clean.json", clean),
        ]);
        assert_eq!(summary.files_checked, 2);
        assert_eq!(summary.files_valid, 1);
        assert_eq!(summary.files_invalid, 1);
        assert_eq!(summary.errors_by_code.get("DANGLING_REFERENCE"), Some(&2));
        assert_eq!(summary.warnings_by_code.get("CYCLE"), Some(&2));
        assert!((summary.valid_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_keeps_both_sides() {
        let mut left = ValidationReport::default();
        left.error("A", "x");
        let mut right = ValidationReport::default();
        right.warning("B", "y");
        left.merge(right);
        assert!(!left.is_valid());
        assert!(left.has_error_code("A"));
        assert!(left.has_warning_code("B"));
        assert_eq!(Diagnostic::new("A", "x").to_string(), "[A] x");
    }
}
