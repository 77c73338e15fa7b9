//! Read-only program model supplied by a compiler front-end.
//!
//! ```text
//! Compilation
//!   └─ TypeSymbol (classes, interfaces, ...)
//!        └─ MethodSymbol
//!             └─ Operation tree (body)
//! ```
//!
//! The model is built either programmatically with the builder methods on
//! [`TypeSymbol`], [`MethodSymbol`] and [`Operation`], or deserialized from
//! the JSON a front-end exporter writes.

mod compilation;
mod operation;
mod symbol;

pub use compilation::{Compilation, ModelError};
pub use operation::{Argument, ConstantValue, Operation, OperationKind};
pub use symbol::{
    Accessibility, MethodId, MethodKind, MethodSymbol, Parameter, RefKind, Suppression, TypeId,
    TypeKind, TypeSymbol,
};
