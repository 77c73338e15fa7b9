//! Rule requiring finalizers to delegate to `Dispose(false)`.
//!
//! # Rationale
//!
//! A finalizer runs on the finalizer thread and must only release unmanaged
//! state through the shared cleanup path:
//!
//! ```text
//! ~Resource()
//! {
//!     Dispose(false);
//! }
//! ```
//!
//! When the base type also finalizes, the compiler wraps the body in an
//! implicit `try { .. } finally { base.Finalize(); }`. The generated
//! `finally` is trusted and only the `try` body is checked.

use crate::call_sequence::{CallSequence, Verdict};
use crate::diagnostic::Finding;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};
use tracing::trace;

/// Rule code for finalize-implementation.
pub const CODE: &str = "DL002";

/// Rule name for finalize-implementation.
pub const NAME: &str = "finalize-implementation";

/// Validates the body of a disposable type's finalizer.
#[derive(Debug, Clone)]
pub struct FinalizeImplementation {
    /// Severity level.
    pub severity: Severity,
}

impl Default for FinalizeImplementation {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalizeImplementation {
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

impl Rule for FinalizeImplementation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Finalizers must call Dispose(false) and nothing else"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.is_sole_implementer() {
            return Vec::new();
        }
        let (Some(finalizer), Some(flag_release)) = (ctx.scan.finalizer, ctx.scan.flag_release)
        else {
            return Vec::new();
        };
        let Some(body) = &finalizer.body else {
            return Vec::new();
        };

        let sequence = CallSequence::finalizer(&ctx.ty.id, &flag_release.id);
        let Some(verdict) = sequence.validate(body, ctx.cancellation) else {
            return Vec::new();
        };
        trace!("{}: {:?}", finalizer.id, verdict);
        if verdict == Verdict::Valid {
            return Vec::new();
        }

        let method = ctx.ty.qualified_method_name(finalizer);
        Finding::on_method(
            ctx.ty,
            finalizer,
            format!("Modify `{method}` so that it calls Dispose(false) and then returns"),
        )
        .help("Move finalization logic into Dispose(bool) on the path where 'disposing' is false")
        .report(self)
        .into_iter()
        .collect()
    }
}
