//! Utility modules for rule implementations.

pub mod suppression;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use suppression::{check_suppression, SuppressionCheck};
