//! Rule against finalizers on types whose base already implements `IDisposable`.
//!
//! The base type owns the finalizer and routes it through `Dispose(false)`;
//! derived types put finalization logic into their `Dispose(bool)` override.

use crate::diagnostic::Finding;
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for finalize-override.
pub const CODE: &str = "DL009";

/// Rule name for finalize-override.
pub const NAME: &str = "finalize-override";

/// Reports finalizers declared by derived disposable types.
#[derive(Debug, Clone)]
pub struct FinalizeOverride {
    /// Severity level.
    pub severity: Severity,
}

impl Default for FinalizeOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalizeOverride {
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

impl Rule for FinalizeOverride {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Derived disposable types must not declare a finalizer"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.base_implements {
            return Vec::new();
        }
        let Some(finalizer) = ctx.scan.finalizer else {
            return Vec::new();
        };

        Finding::on_method(
            ctx.ty,
            finalizer,
            format!(
                "Remove the finalizer from type `{}`, override Dispose(bool disposing), and put \
                 the finalization logic in the code path where 'disposing' is false",
                ctx.ty.name()
            ),
        )
        .report(self)
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, compile, resource, RESOURCE};
    use dispose_lint_core::model::{MethodSymbol, Operation, TypeSymbol};

    fn derived(with_finalizer: bool) -> TypeSymbol {
        let ty = TypeSymbol::class("Demo.Derived").with_base(RESOURCE);
        if with_finalizer {
            ty.with_method(
                MethodSymbol::finalizer("Demo.Derived.Finalize()")
                    .with_body(Operation::block(vec![])),
            )
        } else {
            ty
        }
    }

    #[test]
    fn test_finalizer_on_derived_type_is_reported() {
        let c = compile(vec![resource(), derived(true)]);
        let violations = check(&FinalizeOverride::new(), &c, "Demo.Derived");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        insta::assert_snapshot!(violations[0].message, @"Remove the finalizer from type `Derived`, override Dispose(bool disposing), and put the finalization logic in the code path where 'disposing' is false");
    }

    #[test]
    fn test_derived_without_finalizer_passes() {
        let c = compile(vec![resource(), derived(false)]);
        assert!(check(&FinalizeOverride::new(), &c, "Demo.Derived").is_empty());
    }

    #[test]
    fn test_finalizer_on_root_implementer_is_not_this_rules_concern() {
        let ty = resource().with_method(
            MethodSymbol::finalizer("Demo.Resource.Finalize()").with_body(Operation::block(vec![])),
        );
        let c = compile(vec![ty]);
        assert!(check(&FinalizeOverride::new(), &c, RESOURCE).is_empty());
    }
}
