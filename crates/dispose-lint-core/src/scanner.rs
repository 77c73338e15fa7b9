//! Classification of types against the disposal capability.

use crate::capability::{CapabilityDescriptor, BOOLEAN_TYPE};
use crate::model::{
    Accessibility, Compilation, MethodKind, MethodSymbol, RefKind, TypeKind, TypeSymbol,
};

/// How a type relates to the disposal capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implementation {
    /// The type lists the capability (or an interface extending it) itself.
    DirectImplementer,
    /// Only a base type implements the capability.
    InheritedOnly,
    /// Neither the type nor any base implements the capability.
    NotImplementing,
}

/// A type's relationship to the capability plus the metadata rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Relationship to the capability.
    pub implementation: Implementation,
    /// Whether some base type already implements the capability.
    pub base_implements: bool,
    /// `sealed`
    pub is_sealed: bool,
    /// Declared accessibility.
    pub declared_accessibility: Accessibility,
    /// Whether the type declares its own finalizer.
    pub declares_finalizer: bool,
}

impl TypeDescriptor {
    /// Direct implementer whose bases do not implement the capability.
    #[must_use]
    pub fn is_sole_implementer(&self) -> bool {
        self.implementation == Implementation::DirectImplementer && !self.base_implements
    }
}

/// Result of scanning one type.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScan<'a> {
    /// Classification.
    pub descriptor: TypeDescriptor,
    /// The type's own implementation of the capability method (direct implementers only).
    pub release_entry: Option<&'a MethodSymbol>,
    /// The type's own `Dispose(bool)` (direct implementers only).
    pub flag_release: Option<&'a MethodSymbol>,
    /// The type's own finalizer.
    pub finalizer: Option<&'a MethodSymbol>,
}

/// Locates disposal candidates on types of one compilation.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScanner<'a> {
    compilation: &'a Compilation,
    capability: &'a CapabilityDescriptor,
}

impl<'a> CandidateScanner<'a> {
    /// Creates a scanner over `compilation`.
    #[must_use]
    pub fn new(compilation: &'a Compilation, capability: &'a CapabilityDescriptor) -> Self {
        Self {
            compilation,
            capability,
        }
    }

    /// Classifies `ty` and, for direct implementers, finds its candidate methods.
    ///
    /// Only classes take part in the pattern; every other kind is reported
    /// as [`Implementation::NotImplementing`].
    #[must_use]
    pub fn scan(&self, ty: &'a TypeSymbol) -> CandidateScan<'a> {
        let is_class = ty.kind == TypeKind::Class;
        let direct = is_class && self.implements_directly(ty);
        let base_implements = is_class && self.implements_in_base_type(ty);

        let implementation = if direct {
            Implementation::DirectImplementer
        } else if base_implements {
            Implementation::InheritedOnly
        } else {
            Implementation::NotImplementing
        };

        let (release_entry, flag_release) = if direct {
            (self.find_release_entry(ty), self.find_flag_release(ty))
        } else {
            (None, None)
        };
        let finalizer = ty.finalizer();

        CandidateScan {
            descriptor: TypeDescriptor {
                implementation,
                base_implements,
                is_sealed: ty.is_sealed,
                declared_accessibility: ty.accessibility,
                declares_finalizer: finalizer.is_some(),
            },
            release_entry,
            flag_release,
            finalizer,
        }
    }

    /// Whether a declared interface of `ty` is or extends the capability.
    #[must_use]
    pub fn implements_directly(&self, ty: &TypeSymbol) -> bool {
        self.compilation
            .declares_interface(ty, self.capability.interface())
    }

    /// Whether any base type of `ty` implements the capability.
    #[must_use]
    pub fn implements_in_base_type(&self, ty: &TypeSymbol) -> bool {
        self.compilation
            .base_types(ty)
            .any(|base| self.implements_directly(base))
    }

    /// Nearest base type that implements the capability directly.
    #[must_use]
    pub fn implementing_base(&self, ty: &'a TypeSymbol) -> Option<&'a TypeSymbol> {
        self.compilation
            .base_types(ty)
            .find(|base| self.implements_directly(base))
    }

    /// The method of `ty` implementing the capability method.
    ///
    /// An explicit implementation wins; otherwise a public, instance,
    /// parameterless, void method named like the capability method.
    #[must_use]
    pub fn find_release_entry(&self, ty: &'a TypeSymbol) -> Option<&'a MethodSymbol> {
        let dispose = self.capability.dispose_method();
        ty.methods
            .iter()
            .find(|m| m.explicit_implementations.contains(dispose))
            .or_else(|| {
                ty.methods_named(self.capability.dispose_name()).find(|m| {
                    m.kind == MethodKind::Ordinary
                        && m.accessibility == Accessibility::Public
                        && !m.is_static
                        && m.returns_void
                        && m.parameters.is_empty()
                })
            })
    }

    /// The `Dispose(bool)` method declared by `ty`.
    #[must_use]
    pub fn find_flag_release(&self, ty: &'a TypeSymbol) -> Option<&'a MethodSymbol> {
        ty.methods.iter().find(|m| self.is_flag_release_method(m))
    }

    /// Structural match for `void Dispose(bool)` with a by-value parameter.
    #[must_use]
    pub fn is_flag_release_method(&self, method: &MethodSymbol) -> bool {
        method.kind == MethodKind::Ordinary
            && method.name == self.capability.dispose_name()
            && method.returns_void
            && !method.is_static
            && method.parameters.len() == 1
            && method.parameters[0].ty.as_str() == BOOLEAN_TYPE
            && method.parameters[0].ref_kind == RefKind::None
    }

    /// The release-entry method of the nearest implementing base type.
    #[must_use]
    pub fn base_release_entry(&self, ty: &'a TypeSymbol) -> Option<&'a MethodSymbol> {
        self.implementing_base(ty)
            .and_then(|base| self.find_release_entry(base))
    }
}
