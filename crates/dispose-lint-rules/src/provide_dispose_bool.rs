//! Rule requiring disposable types to declare `Dispose(bool)`.
//!
//! Without an overridable `Dispose(bool)`, derived types have no way to
//! hook into cleanup. Sealed types that are not public are exempt since
//! nothing can derive from them.

use crate::diagnostic::Finding;
use dispose_lint_core::model::Accessibility;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for provide-dispose-bool.
pub const CODE: &str = "DL007";

/// Rule name for provide-dispose-bool.
pub const NAME: &str = "provide-dispose-bool";

/// Reports disposable types without `Dispose(bool)`.
#[derive(Debug, Clone)]
pub struct ProvideDisposeBool {
    /// Severity level.
    pub severity: Severity,
}

impl Default for ProvideDisposeBool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvideDisposeBool {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ProvideDisposeBool {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disposable types must provide an overridable Dispose(bool)"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        let descriptor = &ctx.scan.descriptor;
        if !descriptor.is_sole_implementer() || ctx.scan.flag_release.is_some() {
            return Vec::new();
        }
        if descriptor.is_sealed && descriptor.declared_accessibility != Accessibility::Public {
            return Vec::new();
        }

        Finding::on_type(
            ctx.ty,
            format!(
                "Provide an overridable implementation of Dispose(bool) on `{}` or mark the type as sealed",
                ctx.ty.name()
            ),
        )
        .help("Add `protected virtual void Dispose(bool disposing)` and call it from Dispose()")
        .report(self)
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, compile, resource, RESOURCE};
    use dispose_lint_core::model::TypeSymbol;

    fn without_flag_release() -> TypeSymbol {
        let mut ty = resource();
        ty.methods.truncate(1);
        ty
    }

    #[test]
    fn test_missing_dispose_bool_is_reported() {
        let violations = check(
            &ProvideDisposeBool::new(),
            &compile(vec![without_flag_release()]),
            RESOURCE,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 5);
        insta::assert_snapshot!(violations[0].message, @"Provide an overridable implementation of Dispose(bool) on `Resource` or mark the type as sealed");
    }

    #[test]
    fn test_present_dispose_bool_passes() {
        assert!(check(&ProvideDisposeBool::new(), &compile(vec![resource()]), RESOURCE).is_empty());
    }

    #[test]
    fn test_sealed_non_public_is_exempt() {
        let ty = without_flag_release()
            .sealed()
            .with_accessibility(Accessibility::Internal);
        assert!(check(&ProvideDisposeBool::new(), &compile(vec![ty]), RESOURCE).is_empty());
    }

    #[test]
    fn test_sealed_public_is_reported() {
        let ty = without_flag_release().sealed();
        assert_eq!(
            check(&ProvideDisposeBool::new(), &compile(vec![ty]), RESOURCE).len(),
            1
        );
    }
}
