//! Rule requiring `Dispose()` to delegate to `Dispose(true)` and suppress finalization.
//!
//! # Rationale
//!
//! The public release entry point of a disposable type must do nothing but
//! run the shared cleanup path and tell the runtime that the finalizer no
//! longer needs to run:
//!
//! ```text
//! public void Dispose()
//! {
//!     Dispose(true);
//!     GC.SuppressFinalize(this);
//! }
//! ```
//!
//! Any other statement, a different order, or a missing call is reported.
//! Nothing is checked when the runtime defines no `GC.SuppressFinalize`.
//!
//! # Scope
//!
//! Types that list `IDisposable` themselves while no base type implements
//! it, and that declare both `Dispose()` and `Dispose(bool)`.

use crate::call_sequence::{CallSequence, Verdict};
use crate::diagnostic::Finding;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};
use tracing::trace;

/// Rule code for dispose-implementation.
pub const CODE: &str = "DL001";

/// Rule name for dispose-implementation.
pub const NAME: &str = "dispose-implementation";

/// Validates the body of the release entry point.
#[derive(Debug, Clone)]
pub struct DisposeImplementation {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DisposeImplementation {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeImplementation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for DisposeImplementation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Dispose() must call Dispose(true), then GC.SuppressFinalize(this), and nothing else"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.is_sole_implementer() {
            return Vec::new();
        }
        let (Some(entry), Some(flag_release)) = (ctx.scan.release_entry, ctx.scan.flag_release)
        else {
            return Vec::new();
        };
        let Some(body) = &entry.body else {
            return Vec::new();
        };

        let sequence = CallSequence::release(
            &ctx.ty.id,
            &flag_release.id,
            ctx.capability.suppress_finalize(),
        );
        let Some(verdict) = sequence.validate(body, ctx.cancellation) else {
            return Vec::new();
        };
        trace!("{}: {:?}", entry.id, verdict);
        if verdict == Verdict::Valid {
            return Vec::new();
        }

        let method = ctx.ty.qualified_method_name(entry);
        let message = format!(
            "Modify `{method}` so that it calls Dispose(true), then calls \
             GC.SuppressFinalize on the current object instance, and then returns"
        );

        Finding::on_method(ctx.ty, entry, message)
            .help("Move cleanup logic into Dispose(bool) under `if (disposing)`")
            .report(self)
            .into_iter()
            .collect()
    }
}
