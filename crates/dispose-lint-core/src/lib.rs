//! # dispose-lint-core
//!
//! Core framework for checking the disposal pattern over a compiler
//! front-end's symbol and operation model.
//!
//! This crate provides the foundational model, traits and types for
//! building disposal-pattern rules. It includes:
//!
//! - [`model`] with the read-only [`Compilation`], symbols and operation trees
//! - [`CapabilityDescriptor`] resolving `System.IDisposable` and friends
//! - [`CandidateScanner`] classifying types and locating their release methods
//! - [`Rule`] trait for per-type rules
//! - [`Analyzer`] for orchestrating lint execution across types in parallel
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use dispose_lint_core::{Analyzer, Compilation};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .exclude("MyApp.Generated.*")
//!     .build()?;
//!
//! let compilation = Compilation::from_file("model.json".as_ref())?;
//! let result = analyzer.analyze(&compilation)?;
//! println!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod cancel;
mod capability;
mod config;
mod context;
mod rule;
mod scanner;
mod types;

#[cfg(test)]
mod test_support;

pub mod model;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use cancel::CancellationToken;
pub use capability::{
    CapabilityDescriptor, BOOLEAN_TYPE, DISPOSABLE_INTERFACE, DISPOSE_METHOD, GC_TYPE,
    OBJECT_TYPE, SUPPRESS_FINALIZE_METHOD,
};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::TypeContext;
pub use model::{Compilation, ModelError};
pub use rule::{Rule, RuleBox};
pub use scanner::{CandidateScan, CandidateScanner, Implementation, TypeDescriptor};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use utils::suppression::{check_suppression, SuppressionCheck};
