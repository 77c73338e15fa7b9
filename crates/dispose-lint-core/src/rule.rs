//! Rule trait for defining lint rules.

use crate::context::TypeContext;
use crate::types::{Severity, Violation};

/// A per-type lint rule over the symbol and operation model.
///
/// Rules are stateless and shared across worker threads; everything they
/// need arrives through the [`TypeContext`].
///
/// # Example
///
/// ```ignore
/// use dispose_lint_core::{Rule, TypeContext, Violation, Severity};
///
/// pub struct NoPublicFinalizer;
///
/// impl Rule for NoPublicFinalizer {
///     fn name(&self) -> &'static str { "no-public-finalizer" }
///     fn code(&self) -> &'static str { "DL100" }
///
///     fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
///         ctx.scan.finalizer
///             .filter(|f| f.accessibility == Accessibility::Public)
///             .map(|f| vec![Violation::new(self.code(), self.name(), Severity::Warning,
///                 f.location.clone(), "Finalizers should not be public")])
///             .unwrap_or_default()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "dispose-implementation").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether suppressions of this rule must carry a justification.
    ///
    /// By default, rules with `Severity::Error` require one.
    fn requires_justification(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single type and returns any violations found.
    ///
    /// Must return an empty vector, not a partial result, once
    /// [`TypeContext::is_cancelled`] reports cancellation.
    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
