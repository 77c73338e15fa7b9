//! # dispose-lint-rules
//!
//! Built-in rules checking the `IDisposable` pattern.
//!
//! The two body checks walk operation trees with a shared required-call
//! state machine ([`CallSequence`]); the rest are predicates over symbol
//! metadata.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `dispose-implementation` | `Dispose()` calls `Dispose(true)` then `GC.SuppressFinalize(this)` |
//! | DL002 | `finalize-implementation` | Finalizers call `Dispose(false)` |
//! | DL003 | `disposable-reimplementation` | No re-listing of `IDisposable` already implemented by a base |
//! | DL004 | `dispose-signature` | `Dispose()` is public and not overridable |
//! | DL005 | `rename-dispose` | The `IDisposable.Dispose` implementation is named `Dispose` |
//! | DL006 | `dispose-bool-signature` | `Dispose(bool)` is protected, virtual and unsealed |
//! | DL007 | `provide-dispose-bool` | Disposable types declare `Dispose(bool)` |
//! | DL008 | `dispose-override` | Derived types do not override `Dispose()` |
//! | DL009 | `finalize-override` | Derived types do not declare a finalizer |
//!
//! ## Usage
//!
//! ```ignore
//! use dispose_lint_core::Analyzer;
//! use dispose_lint_rules::{DisposeImplementation, FinalizeImplementation};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(DisposeImplementation::new())
//!     .rule(FinalizeImplementation::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod call_sequence;
mod diagnostic;
mod disposable_reimplementation;
mod dispose_bool_signature;
mod dispose_implementation;
mod dispose_override;
mod dispose_signature;
mod finalize_implementation;
mod finalize_override;
mod presets;
mod provide_dispose_bool;
mod rename_dispose;

#[cfg(test)]
mod test_support;

pub use call_sequence::{CallSequence, Progress, Rejected, Step, Verdict};
pub use disposable_reimplementation::DisposableReimplementation;
pub use dispose_bool_signature::DisposeBoolSignature;
pub use dispose_implementation::DisposeImplementation;
pub use dispose_override::DisposeOverride;
pub use dispose_signature::DisposeSignature;
pub use finalize_implementation::FinalizeImplementation;
pub use finalize_override::FinalizeOverride;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use provide_dispose_bool::ProvideDisposeBool;
pub use rename_dispose::RenameDispose;

/// Re-export core types for convenience.
pub use dispose_lint_core::{Rule, Severity, Violation};
