//! Rule against overriding the inherited `Dispose()`.
//!
//! When a base type implements `IDisposable`, derived types put their
//! cleanup into an override of `Dispose(bool)`. Overriding `Dispose()`
//! itself splits cleanup across two entry points.

use crate::diagnostic::Finding;
use dispose_lint_core::model::{Compilation, MethodId, MethodSymbol};
use dispose_lint_core::{Rule, Severity, TypeContext, Violation};

/// Rule code for dispose-override.
pub const CODE: &str = "DL008";

/// Rule name for dispose-override.
pub const NAME: &str = "dispose-override";

/// Reports overrides of the base type's release entry point.
#[derive(Debug, Clone)]
pub struct DisposeOverride {
    /// Severity level.
    pub severity: Severity,
}

impl Default for DisposeOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl DisposeOverride {
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

impl Rule for DisposeOverride {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Derived types must override Dispose(bool) instead of Dispose()"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &TypeContext<'_>) -> Vec<Violation> {
        if !ctx.scan.descriptor.base_implements {
            return Vec::new();
        }
        let Some(base_entry) = ctx.scanner().base_release_entry(ctx.ty) else {
            return Vec::new();
        };

        ctx.ty
            .methods
            .iter()
            .filter(|m| m.is_override && overrides(ctx.compilation, m, &base_entry.id))
            .filter_map(|m| {
                Finding::on_method(
                    ctx.ty,
                    m,
                    format!(
                        "Remove `{}`, override Dispose(bool disposing), and put the dispose \
                         logic in the code path where 'disposing' is true",
                        ctx.ty.qualified_method_name(m)
                    ),
                )
                .report(self)
            })
            .collect()
    }
}

/// Whether `method` overrides `target`, directly or through intermediate overrides.
fn overrides(compilation: &Compilation, method: &MethodSymbol, target: &MethodId) -> bool {
    let mut current = method.overridden.as_ref();
    let mut remaining = compilation.types().len();
    while let Some(id) = current {
        if id == target {
            return true;
        }
        if remaining == 0 {
            return false;
        }
        remaining -= 1;
        current = compilation
            .get_method(id)
            .and_then(|(_, m)| m.overridden.as_ref());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, compile, dispose_bool, resource, DISPOSE, RESOURCE};
    use dispose_lint_core::model::{Parameter, TypeSymbol};
    use dispose_lint_core::BOOLEAN_TYPE;

    fn virtual_resource() -> TypeSymbol {
        let mut ty = resource();
        ty.methods[0].is_virtual = true;
        ty
    }

    #[test]
    fn test_override_of_dispose_is_reported() {
        let derived = TypeSymbol::class("Demo.Derived")
            .with_base(RESOURCE)
            .with_method(
                MethodSymbol::new("Demo.Derived.Dispose()", "Dispose")
                    .public()
                    .overriding(DISPOSE),
            );
        let c = compile(vec![virtual_resource(), derived]);
        let violations = check(&DisposeOverride::new(), &c, "Demo.Derived");
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @"Remove `Derived.Dispose()`, override Dispose(bool disposing), and put the dispose logic in the code path where 'disposing' is true");
    }

    #[test]
    fn test_override_through_intermediate_is_reported() {
        let middle = TypeSymbol::class("Demo.Middle")
            .with_base(RESOURCE)
            .with_method(
                MethodSymbol::new("Demo.Middle.Dispose()", "Dispose")
                    .public()
                    .overriding(DISPOSE),
            );
        let leaf = TypeSymbol::class("Demo.Leaf")
            .with_base("Demo.Middle")
            .with_method(
                MethodSymbol::new("Demo.Leaf.Dispose()", "Dispose")
                    .public()
                    .overriding("Demo.Middle.Dispose()"),
            );
        let c = compile(vec![virtual_resource(), middle, leaf]);
        assert_eq!(check(&DisposeOverride::new(), &c, "Demo.Leaf").len(), 1);
    }

    #[test]
    fn test_override_of_dispose_bool_passes() {
        let derived = TypeSymbol::class("Demo.Derived")
            .with_base(RESOURCE)
            .with_method(
                MethodSymbol::new("Demo.Derived.Dispose(bool)", "Dispose")
                    .protected()
                    .overriding(dispose_bool().id)
                    .with_parameter(Parameter::new("disposing", BOOLEAN_TYPE)),
            );
        let c = compile(vec![virtual_resource(), derived]);
        assert!(check(&DisposeOverride::new(), &c, "Demo.Derived").is_empty());
    }

    #[test]
    fn test_override_cycle_terminates() {
        let derived = TypeSymbol::class("Demo.Derived")
            .with_base(RESOURCE)
            .with_method(
                MethodSymbol::new("Demo.Derived.Close()", "Close")
                    .public()
                    .overriding("Demo.Derived.Close()"),
            );
        let c = compile(vec![virtual_resource(), derived]);
        assert!(check(&DisposeOverride::new(), &c, "Demo.Derived").is_empty());
    }
}
