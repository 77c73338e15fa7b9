//! Rule presets for common configurations.

use crate::{
    DisposableReimplementation, DisposeBoolSignature, DisposeImplementation, DisposeOverride,
    DisposeSignature, FinalizeImplementation, FinalizeOverride, ProvideDisposeBool, RenameDispose,
};
use dispose_lint_core::{RuleBox, Severity};

/// Preset configurations for dispose-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    Recommended,
    /// Every rule, reported as an error.
    Strict,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes the body checks and the signature checks of the type that
/// first implements `IDisposable`:
/// - `dispose-implementation` (DL001)
/// - `finalize-implementation` (DL002)
/// - `disposable-reimplementation` (DL003)
/// - `dispose-signature` (DL004)
/// - `dispose-bool-signature` (DL006)
/// - `provide-dispose-bool` (DL007)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(DisposeImplementation::new()),
        Box::new(FinalizeImplementation::new()),
        Box::new(DisposableReimplementation::new()),
        Box::new(DisposeSignature::new()),
        Box::new(DisposeBoolSignature::new()),
        Box::new(ProvideDisposeBool::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Every rule with its severity raised to error, so suppressions of any
/// of them need a justification.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(DisposeImplementation::new()),
        Box::new(FinalizeImplementation::new()),
        Box::new(DisposableReimplementation::new().severity(Severity::Error)),
        Box::new(DisposeSignature::new().severity(Severity::Error)),
        Box::new(RenameDispose::new().severity(Severity::Error)),
        Box::new(DisposeBoolSignature::new().severity(Severity::Error)),
        Box::new(ProvideDisposeBool::new().severity(Severity::Error)),
        Box::new(DisposeOverride::new().severity(Severity::Error)),
        Box::new(FinalizeOverride::new().severity(Severity::Error)),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only the body checks:
/// - `dispose-implementation` (DL001)
/// - `finalize-implementation` (DL002)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(DisposeImplementation::new()),
        Box::new(FinalizeImplementation::new()),
    ]
}

/// Returns all available rules with their default severities.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(DisposeImplementation::new()),
        Box::new(FinalizeImplementation::new()),
        Box::new(DisposableReimplementation::new()),
        Box::new(DisposeSignature::new()),
        Box::new(RenameDispose::new()),
        Box::new(DisposeBoolSignature::new()),
        Box::new(ProvideDisposeBool::new()),
        Box::new(DisposeOverride::new()),
        Box::new(FinalizeOverride::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert_eq!(Preset::Minimal.rules().len(), 2);
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("Recommended"), Some(Preset::Recommended));
        assert_eq!(Preset::from_name("strict"), Some(Preset::Strict));
        assert_eq!(Preset::from_name("lenient"), None);
    }

    #[test]
    fn test_all_rules_have_unique_codes() {
        let rules = all_rules();
        let mut codes: Vec<&str> = rules.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 9);
        assert!(strict_rules()
            .iter()
            .all(|r| r.default_severity() == Severity::Error && r.requires_justification()));
    }
}
