//! Rule requiring the release entry point to be public and non-overridable.
//!
//! Derived types customize cleanup through `Dispose(bool)`, so `Dispose()`
//! itself must be public and must not be `virtual`, `abstract`, or an
//! unsealed `override`. Explicit interface implementations are exempt.

use crate::diagnostic::Finding;
use dispose_lint_core::model::{Accessibility, MethodKind};
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for dispose-signature.
pub const CODE: &str = "DL004";

/// Rule name for dispose-signature.
pub const NAME: &str = "dispose-signature";

/// Checks the modifiers of the release entry point.
#[derive(Debug, Clone)]
pub struct DisposeSignature {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DisposeSignature {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeSignature {
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

impl Rule for DisposeSignature {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dispose() must be public and not overridable"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.is_sole_implementer() {
            return Vec::new();
        }
        let Some(entry) = ctx.scan.release_entry else {
            return Vec::new();
        };
        if entry.kind == MethodKind::ExplicitInterfaceImplementation {
            return Vec::new();
        }
        if entry.accessibility == Accessibility::Public && !entry.is_overridable() {
            return Vec::new();
        }

        Finding::on_method(
            ctx.ty,
            entry,
            format!(
                "Ensure that `{}` is declared as public and sealed",
                ctx.ty.qualified_method_name(entry)
            ),
        )
        .report(self)
        .into_iter()
        .collect()
    }
}
