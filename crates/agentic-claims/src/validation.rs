//! Validation results — accumulated, severity-classified findings.
//!
//! Validation never fails fast. Every validatable entity appends what it
//! finds to a `ValidationResults` so the caller sees all problems in one
//! pass and decides what to do with them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable description.
    pub description: String,
    /// The credential is unusable while this issue stands.
    pub blocking: bool,
    /// The issue depends on the current wall-clock time.
    pub time_check: bool,
}

impl ValidationIssue {
    /// A structural or semantic violation.
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            blocking: true,
            time_check: false,
        }
    }

    /// A finding that does not by itself make the credential unusable.
    pub fn warning(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            blocking: false,
            time_check: false,
        }
    }

    /// A finding that only holds relative to the current time.
    pub fn time_check(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            blocking: false,
            time_check: true,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match (self.blocking, self.time_check) {
            (true, _) => "error",
            (false, true) => "time",
            (false, false) => "warning",
        };
        write!(f, "[{level}] {}", self.description)
    }
}

/// Ordered, append-only list of findings from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResults {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResults {
    /// Start a fresh validation pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of recorded issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Append one issue.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Append a blocking issue.
    pub fn add_error(&mut self, description: impl Into<String>) {
        self.add(ValidationIssue::error(description));
    }

    /// Append a non-blocking issue.
    pub fn add_warning(&mut self, description: impl Into<String>) {
        self.add(ValidationIssue::warning(description));
    }

    /// Append a time-dependent issue.
    pub fn add_time_check(&mut self, description: impl Into<String>) {
        self.add(ValidationIssue::time_check(description));
    }

    /// Append every issue from another pass, preserving order.
    pub fn add_issues(&mut self, other: ValidationResults) {
        self.issues.extend(other.issues);
    }

    /// True if any issue is blocking, or if `time_checks_blocking` is set
    /// and any issue is time-dependent.
    pub fn is_blocking(&self, time_checks_blocking: bool) -> bool {
        self.issues
            .iter()
            .any(|i| i.blocking || (time_checks_blocking && i.time_check))
    }

    /// True if any time-dependent issue was recorded.
    pub fn is_time_sensitive(&self) -> bool {
        self.issues.iter().any(|i| i.time_check)
    }

    /// Blocking issues only.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.blocking)
    }

    /// Non-blocking issues, including time checks.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| !i.blocking)
    }

    /// Iterate all issues in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.issues.iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResults {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
