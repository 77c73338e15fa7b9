//! Runtime types shared by unit tests.

use crate::capability::{
    DISPOSABLE_INTERFACE, DISPOSE_METHOD, GC_TYPE, OBJECT_TYPE, SUPPRESS_FINALIZE_METHOD,
};
use crate::model::{Accessibility, MethodSymbol, Parameter, TypeSymbol};

pub(crate) const SUPPRESS_FINALIZE: &str = "System.GC.SuppressFinalize(object)";

pub(crate) fn disposable() -> TypeSymbol {
    TypeSymbol::interface(DISPOSABLE_INTERFACE)
        .with_accessibility(Accessibility::Public)
        .with_method(
            MethodSymbol::new("System.IDisposable.Dispose()", DISPOSE_METHOD)
                .public()
                .as_abstract(),
        )
}

pub(crate) fn gc() -> TypeSymbol {
    TypeSymbol::class(GC_TYPE).sealed().with_method(
        MethodSymbol::new(SUPPRESS_FINALIZE, SUPPRESS_FINALIZE_METHOD)
            .public()
            .as_static()
            .with_parameter(Parameter::new("obj", OBJECT_TYPE)),
    )
}

/// `System.IDisposable` and `System.GC`, enough to resolve the capability.
pub(crate) fn runtime() -> Vec<TypeSymbol> {
    vec![disposable(), gc()]
}
