//! Turns a failed check into a [`Violation`], honoring suppressions.

use dispose_lint_core::model::{MethodSymbol, TypeSymbol};
use dispose_lint_core::{check_suppression, Rule, Severity, Suggestion, Violation};

/// A failed check on a type, or on one of its methods.
pub(crate) struct Finding<'a> {
    ty: &'a TypeSymbol,
    method: Option<&'a MethodSymbol>,
    message: String,
    arguments: Vec<String>,
    help: Option<&'static str>,
}

impl<'a> Finding<'a> {
    /// A finding reported at the type's declaration.
    pub(crate) fn on_type(ty: &'a TypeSymbol, message: impl Into<String>) -> Self {
        Self {
            ty,
            method: None,
            message: message.into(),
            arguments: vec![ty.name().to_string()],
            help: None,
        }
    }

    /// A finding reported at a method's declaration.
    pub(crate) fn on_method(
        ty: &'a TypeSymbol,
        method: &'a MethodSymbol,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ty,
            method: Some(method),
            message: message.into(),
            arguments: vec![ty.name().to_string(), ty.qualified_method_name(method)],
            help: None,
        }
    }

    /// Appends a message argument.
    pub(crate) fn argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub(crate) fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Reports the finding for `rule`.
    ///
    /// Returns nothing when the method or type suppresses the rule. A
    /// suppression of a rule that requires a justification but carries none
    /// is reported as a warning instead.
    pub(crate) fn report(self, rule: &dyn Rule) -> Option<Violation> {
        let method_suppressions = self.method.map_or(&[][..], |m| m.suppressions.as_slice());
        let check = check_suppression(
            &[method_suppressions, &self.ty.suppressions],
            rule.code(),
            rule.name(),
        );
        let location = self
            .method
            .map_or_else(|| self.ty.location.clone(), |m| m.location.clone());

        if check.is_suppressed() {
            if rule.requires_justification() && check.justification().is_none() {
                let symbol = self.method.map_or_else(
                    || self.ty.name().to_string(),
                    |m| self.ty.qualified_method_name(m),
                );
                return Some(
                    Violation::new(
                        rule.code(),
                        rule.name(),
                        Severity::Warning,
                        location,
                        format!(
                            "Suppression of '{}' on `{symbol}` is missing a justification",
                            rule.name()
                        ),
                    )
                    .with_arguments(self.arguments)
                    .with_suggestion(Suggestion::new(
                        "Add Justification = \"...\" to explain why this exception is necessary",
                    )),
                );
            }
            return None;
        }

        let mut violation = Violation::new(
            rule.code(),
            rule.name(),
            rule.default_severity(),
            location,
            self.message,
        )
        .with_arguments(self.arguments);
        if let Some(help) = self.help {
            violation = violation.with_suggestion(Suggestion::new(help));
        }
        Some(violation)
    }
}
