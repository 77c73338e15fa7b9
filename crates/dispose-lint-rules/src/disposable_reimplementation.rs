//! Rule against re-listing `IDisposable` on a type whose base already implements it.
//!
//! # Rationale
//!
//! Re-implementing the interface rebinds `IDisposable.Dispose` to the
//! derived type and bypasses the base type's `Dispose(bool)` override chain.
//! Derived types should override `Dispose(bool)` instead.

use crate::diagnostic::Finding;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for disposable-reimplementation.
pub const CODE: &str = "DL003";

/// Rule name for disposable-reimplementation.
pub const NAME: &str = "disposable-reimplementation";

/// Reports types that list `IDisposable` although a base type implements it.
#[derive(Debug, Clone)]
pub struct DisposableReimplementation {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DisposableReimplementation {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposableReimplementation {
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

impl Rule for DisposableReimplementation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Types must not re-implement IDisposable already implemented by a base type"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.base_implements
            || !ctx.ty.interfaces.contains(ctx.capability.interface())
        {
            return Vec::new();
        }
        let Some(base) = ctx.scanner().implementing_base(ctx.ty) else {
            return Vec::new();
        };

        Finding::on_type(
            ctx.ty,
            format!(
                "Remove IDisposable from the list of interfaces implemented by `{}` \
                 as it is already implemented by base type `{}`",
                ctx.ty.name(),
                base.name()
            ),
        )
        .argument(base.name())
        .help("Override Dispose(bool) instead of re-implementing IDisposable")
        .report(self)
        .into_iter()
        .collect()
    }
}
