//! Attribute-based suppression of diagnostics.
//!
//! Front-ends resolve `SuppressMessage`-style attributes into
//! [`Suppression`] entries on types and methods:
//! ```text
//! [SuppressMessage("Design", "DL001", Justification = "pooled instance")]
//! ```
//! A suppression names a rule by code (`DL001`) or name
//! (`dispose-implementation`); `all` suppresses every rule.

use crate::model::Suppression;

/// Result of checking symbols for a suppression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressionCheck {
    /// No suppression applies.
    Active,
    /// The rule is suppressed, with an optional justification.
    Suppressed {
        /// The justification given (if any).
        justification: Option<String>,
    },
}

impl SuppressionCheck {
    /// Returns true if suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }

    /// Returns the justification if suppressed.
    #[must_use]
    pub fn justification(&self) -> Option<&str> {
        match self {
            Self::Suppressed { justification } => justification.as_deref(),
            Self::Active => None,
        }
    }
}

/// Checks suppression lists, innermost symbol first, for a rule.
///
/// A justified suppression is preferred over an unjustified one so that a
/// method-level justification is not shadowed by a bare type-level entry.
///
/// # Arguments
///
/// * `scopes` - Suppression lists, e.g. `[&method.suppressions, &ty.suppressions]`
/// * `code` - Rule code (e.g., `DL001`)
/// * `name` - Rule name (e.g., `dispose-implementation`)
#[must_use]
pub fn check_suppression(scopes: &[&[Suppression]], code: &str, name: &str) -> SuppressionCheck {
    let mut matching = scopes
        .iter()
        .flat_map(|scope| scope.iter())
        .filter(|s| matches_rule(&s.check_id, code, name))
        .peekable();

    let Some(first) = matching.peek().copied() else {
        return SuppressionCheck::Active;
    };

    let justified = matching
        .find(|s| s.justification.as_deref().is_some_and(|j| !j.trim().is_empty()))
        .unwrap_or(first);

    SuppressionCheck::Suppressed {
        justification: justified
            .justification
            .clone()
            .filter(|j| !j.trim().is_empty()),
    }
}

/// Matches `DL001`, `dispose-implementation`, `DL001:dispose-implementation` or `all`.
fn matches_rule(check_id: &str, code: &str, name: &str) -> bool {
    let check_id = check_id.trim();
    if check_id.eq_ignore_ascii_case("all") {
        return true;
    }
    check_id
        .split(':')
        .map(str::trim)
        .any(|part| part.eq_ignore_ascii_case(code) || part == name)
}
