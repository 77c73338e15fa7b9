//! Rule requiring the `IDisposable.Dispose` implementation to be named `Dispose`.
//!
//! Languages that bind interface members by clause (`Implements
//! IDisposable.Dispose`) allow any name. Callers expect `Dispose`.

use crate::diagnostic::Finding;
use dispose_lint_core::model::MethodKind;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for rename-dispose.
pub const CODE: &str = "DL005";

/// Rule name for rename-dispose.
pub const NAME: &str = "rename-dispose";

/// Reports release entry points not named like the capability method.
#[derive(Debug, Clone)]
pub struct RenameDispose {
    /// Severity level.
    pub severity: Severity,
}

impl Default for RenameDispose {
    fn default() -> Self {
        Self::new()
    }
}

impl RenameDispose {
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

impl Rule for RenameDispose {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "The IDisposable.Dispose implementation must be named Dispose"
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
        if entry.kind == MethodKind::ExplicitInterfaceImplementation
            || entry.name == ctx.capability.dispose_name()
        {
            return Vec::new();
        }

        Finding::on_method(
            ctx.ty,
            entry,
            format!(
                "Rename `{}` to 'Dispose' and ensure that it is declared as public and sealed",
                ctx.ty.qualified_method_name(entry)
            ),
        )
        .report(self)
        .into_iter()
        .collect()
    }
}
