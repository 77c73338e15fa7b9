//! Rule requiring `Dispose(bool)` to be protected, overridable and unsealed.
//!
//! Sealed types cannot be derived from and are exempt.

use crate::diagnostic::Finding;
use dispose_lint_core::model::Accessibility;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for dispose-bool-signature.
pub const CODE: &str = "DL006";

/// Rule name for dispose-bool-signature.
pub const NAME: &str = "dispose-bool-signature";

/// Checks the modifiers of `Dispose(bool)`.
#[derive(Debug, Clone)]
pub struct DisposeBoolSignature {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DisposeBoolSignature {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeBoolSignature {
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

impl Rule for DisposeBoolSignature {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dispose(bool) must be protected, virtual and unsealed"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.is_sole_implementer() || ctx.scan.descriptor.is_sealed {
            return Vec::new();
        }
        let Some(flag_release) = ctx.scan.flag_release else {
            return Vec::new();
        };
        if flag_release.accessibility == Accessibility::Protected && flag_release.is_overridable()
        {
            return Vec::new();
        }

        Finding::on_method(
            ctx.ty,
            flag_release,
            format!(
                "Ensure that `{}` is declared as protected, virtual, and unsealed",
                ctx.ty.qualified_method_name(flag_release)
            ),
        )
        .report(self)
        .into_iter()
        .collect()
    }
}
