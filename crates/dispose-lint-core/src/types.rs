//! Core types for lint violations and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location of a symbol declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file path as reported by the front-end.
    #[serde(default)]
    pub file: PathBuf,
    /// Line number (1-indexed, 0 when unknown).
    #[serde(default)]
    pub line: usize,
    /// Column number (1-indexed, 0 when unknown).
    #[serde(default)]
    pub column: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DL001").
    pub code: String,
    /// Rule name (e.g., "dispose-implementation").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Message arguments (declaring type name, qualified method name).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            arguments: Vec::new(),
            suggestion: None,
        }
    }

    /// Sets the message arguments.
    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation as a miette diagnostic for rich terminal rendering.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    code: String,
    help: Option<String>,
    severity: miette::Severity,
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let severity = match v.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        };
        Self {
            message: format!(
                "{} ({}:{}:{})",
                v.message,
                v.location.file.display(),
                v.location.line,
                v.location.column
            ),
            code: v.code.clone(),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            severity,
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of types checked.
    pub types_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity >= Severity::Warning)
    }

    /// Returns violations filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Returns violations produced by one rule, matched by code or name.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.code == rule || v.rule == rule)
            .collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Formats the full report as plain text.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for violation in &self.violations {
            let _ = writeln!(report, "{}", violation.format());
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = write!(
            report,
            "Found {} error(s), {} warning(s), {} info(s) in {} type(s)",
            errors, warnings, infos, self.types_checked
        );
        report
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Sorts violations by file, line, column, then code.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.types_checked += other.types_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "DL001",
            "dispose-implementation",
            severity,
            Location::new("src/Resource.cs", 42, 17),
            "Modify `Resource.Dispose()` so that it calls Dispose(true)",
        )
    }

    #[test]
    fn violation_format_includes_suggestion() {
        let v = make_violation(Severity::Error)
            .with_suggestion(Suggestion::new("Call GC.SuppressFinalize(this)"));
        insta::assert_snapshot!(v.format(), @r"
        DL001 dispose-implementation at src/Resource.cs:42:17
          error: Modify `Resource.Dispose()` so that it calls Dispose(true)
          = help: Call GC.SuppressFinalize(this)
        ");
    }

    #[test]
    fn violation_display_is_compact() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "src/Resource.cs:42:17: warning [DL001] Modify `Resource.Dispose()` so that it calls Dispose(true)"
        );
    }

    #[test]
    fn violation_arguments_are_recorded() {
        let v = make_violation(Severity::Error).with_arguments(["Resource", "Resource.Dispose()"]);
        assert_eq!(v.arguments, vec!["Resource", "Resource.Dispose()"]);
    }

    #[test]
    fn diagnostic_maps_severity_and_help() {
        let v = make_violation(Severity::Warning).with_suggestion(Suggestion::new("fix it"));
        let diag = ViolationDiagnostic::from(&v);
        assert_eq!(diag.severity(), Some(miette::Severity::Warning));
        assert_eq!(diag.help().map(|h| h.to_string()), Some("fix it".to_string()));
        assert_eq!(diag.code().map(|c| c.to_string()), Some("DL001".to_string()));
        assert!(diag.to_string().ends_with("(src/Resource.cs:42:17)"));
    }

    // --- LintResult tests ---

    #[test]
    fn has_violations_at_error_only() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(result.has_warnings());
        assert!(!result.has_errors());
    }

    #[test]
    fn report_summarizes_counts() {
        let mut result = LintResult::new();
        result.types_checked = 3;
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Info));

        let report = result.format_report();
        assert!(report.ends_with("Found 1 error(s), 0 warning(s), 1 info(s) in 3 type(s)"));
        assert_eq!(result.by_rule("dispose-implementation").len(), 2);
        assert_eq!(result.by_severity(Severity::Info).len(), 1);
    }

    #[test]
    fn sort_orders_by_location_then_code() {
        let mut result = LintResult::new();
        let mut late = make_violation(Severity::Error);
        late.location.line = 90;
        let mut other_code = make_violation(Severity::Error);
        other_code.code = "DL000".into();
        result.violations = vec![late, make_violation(Severity::Error), other_code];

        result.sort();
        let order: Vec<(usize, &str)> = result
            .violations
            .iter()
            .map(|v| (v.location.line, v.code.as_str()))
            .collect();
        assert_eq!(order, vec![(42, "DL000"), (42, "DL001"), (90, "DL001")]);
    }

    #[test]
    fn extend_merges_counts() {
        let mut a = LintResult::new();
        a.types_checked = 2;
        let mut b = LintResult::new();
        b.types_checked = 5;
        b.violations.push(make_violation(Severity::Error));
        a.extend(b);
        assert_eq!(a.types_checked, 7);
        assert_eq!(a.violations.len(), 1);
    }
}
