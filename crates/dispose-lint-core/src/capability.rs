//! Resolution of the well-known symbols the disposal rules depend on.

use crate::model::{Compilation, MethodId, MethodSymbol, TypeId, TypeKind};

/// Metadata name of the disposal capability interface.
pub const DISPOSABLE_INTERFACE: &str = "System.IDisposable";

/// Name of the capability's single method.
pub const DISPOSE_METHOD: &str = "Dispose";

/// Metadata name of the type declaring the suppression routine.
pub const GC_TYPE: &str = "System.GC";

/// Name of the finalization-suppression routine.
pub const SUPPRESS_FINALIZE_METHOD: &str = "SuppressFinalize";

/// Metadata name of the boolean type.
pub const BOOLEAN_TYPE: &str = "System.Boolean";

/// Metadata name of the root object type.
pub const OBJECT_TYPE: &str = "System.Object";

/// The resolved disposal capability of one compilation.
///
/// Built once per analysis with [`CapabilityDescriptor::resolve`] and then
/// shared read-only by every rule invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    interface: TypeId,
    dispose: MethodId,
    dispose_name: String,
    suppress_finalize: MethodId,
}

impl CapabilityDescriptor {
    /// Resolves the capability from the compilation's type universe.
    ///
    /// Returns `None` when the capability interface, its method or
    /// `GC.SuppressFinalize(object)` is not defined. Every dependent check is
    /// then skipped.
    #[must_use]
    pub fn resolve(compilation: &Compilation) -> Option<Self> {
        let interface = compilation
            .find_type(DISPOSABLE_INTERFACE)
            .filter(|t| t.kind == TypeKind::Interface)?;
        let dispose = interface
            .methods_named(DISPOSE_METHOD)
            .find(|m| m.parameters.is_empty() && m.returns_void && !m.is_static)?;
        let suppress_finalize = compilation
            .find_type(GC_TYPE)?
            .methods_named(SUPPRESS_FINALIZE_METHOD)
            .find(|m| is_suppress_finalize_signature(m))?;

        Some(Self {
            interface: interface.id.clone(),
            dispose: dispose.id.clone(),
            dispose_name: dispose.name.clone(),
            suppress_finalize: suppress_finalize.id.clone(),
        })
    }

    /// The capability interface.
    #[must_use]
    pub fn interface(&self) -> &TypeId {
        &self.interface
    }

    /// The capability's single method.
    #[must_use]
    pub fn dispose_method(&self) -> &MethodId {
        &self.dispose
    }

    /// Name the release-entry and flag-release methods are expected to carry.
    #[must_use]
    pub fn dispose_name(&self) -> &str {
        &self.dispose_name
    }

    /// The finalization-suppression routine.
    #[must_use]
    pub fn suppress_finalize(&self) -> &MethodId {
        &self.suppress_finalize
    }
}

fn is_suppress_finalize_signature(method: &MethodSymbol) -> bool {
    method.is_static
        && method.returns_void
        && method.parameters.len() == 1
        && method.parameters[0].ty.as_str() == OBJECT_TYPE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeSymbol;
    use crate::test_support::{disposable, gc, runtime, SUPPRESS_FINALIZE};

    #[test]
    fn resolves_full_capability() {
        let c = Compilation::new("Demo", runtime()).expect("valid");
        let cap = CapabilityDescriptor::resolve(&c).expect("capability present");
        assert_eq!(cap.interface().as_str(), DISPOSABLE_INTERFACE);
        assert_eq!(cap.dispose_method().as_str(), "System.IDisposable.Dispose()");
        assert_eq!(cap.dispose_name(), "Dispose");
        assert_eq!(cap.suppress_finalize().as_str(), SUPPRESS_FINALIZE);
    }

    #[test]
    fn absent_interface_yields_none() {
        let c = Compilation::new("Demo", vec![gc()]).expect("valid");
        assert!(CapabilityDescriptor::resolve(&c).is_none());

        let not_an_interface = TypeSymbol::class(DISPOSABLE_INTERFACE);
        let c = Compilation::new("Demo", vec![not_an_interface, gc()]).expect("valid");
        assert!(CapabilityDescriptor::resolve(&c).is_none());
    }

    #[test]
    fn absent_suppression_routine_yields_none() {
        let c = Compilation::new("Demo", vec![disposable()]).expect("valid");
        assert!(CapabilityDescriptor::resolve(&c).is_none());
    }

    #[test]
    fn suppress_finalize_with_wrong_signature_yields_none() {
        let gc = TypeSymbol::class(GC_TYPE).with_method(
            MethodSymbol::new("System.GC.SuppressFinalize()", SUPPRESS_FINALIZE_METHOD)
                .public()
                .as_static(),
        );
        let c = Compilation::new("Demo", vec![disposable(), gc]).expect("valid");
        assert!(CapabilityDescriptor::resolve(&c).is_none());
    }
}
