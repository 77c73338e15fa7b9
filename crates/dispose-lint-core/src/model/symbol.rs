//! Symbol view of a compiled program: types, methods, and their metadata.

use crate::model::operation::Operation;
use crate::types::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified metadata name of a type (e.g., `System.IDisposable`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Creates a new type id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Compilation-unique identity of a method (e.g., `Demo.Resource.Dispose(bool)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    /// Creates a new method id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MethodId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Declared accessibility of a type or member.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// `private`
    #[default]
    Private,
    /// `private protected`
    PrivateProtected,
    /// `protected`
    Protected,
    /// `internal`
    Internal,
    /// `protected internal`
    ProtectedInternal,
    /// `public`
    Public,
}

impl Accessibility {
    /// Every accessibility level, from least to most visible.
    pub const ALL: [Self; 6] = [
        Self::Private,
        Self::PrivateProtected,
        Self::Protected,
        Self::Internal,
        Self::ProtectedInternal,
        Self::Public,
    ];
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Private => "private",
            Self::PrivateProtected => "private protected",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedInternal => "protected internal",
            Self::Public => "public",
        };
        f.write_str(s)
    }
}

/// Kind of a named type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Reference type.
    #[default]
    Class,
    /// Value type.
    Struct,
    /// Interface.
    Interface,
    /// Enumeration.
    Enum,
    /// Delegate.
    Delegate,
}

/// Kind of a method symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Ordinarily dispatched method.
    #[default]
    Ordinary,
    /// Explicit interface implementation (`void IDisposable.Dispose()`).
    ExplicitInterfaceImplementation,
    /// Finalizer (`~T()`).
    Finalizer,
    /// Instance or static constructor.
    Constructor,
    /// Property or event accessor.
    Accessor,
}

/// How a parameter is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// By value.
    #[default]
    None,
    /// `ref`
    Ref,
    /// `out`
    Out,
    /// `in`
    In,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    #[serde(rename = "type")]
    pub ty: TypeId,
    /// Passing convention.
    #[serde(default)]
    pub ref_kind: RefKind,
}

impl Parameter {
    /// Creates a by-value parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<TypeId>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            ref_kind: RefKind::None,
        }
    }

    /// Sets the passing convention.
    #[must_use]
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }
}

/// A resolved `SuppressMessage`-style attribute on a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    /// Rule code or rule name being suppressed (e.g., `DL001`).
    pub check_id: String,
    /// Justification given for the suppression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl Suppression {
    /// Creates a suppression without justification.
    #[must_use]
    pub fn new(check_id: impl Into<String>) -> Self {
        Self {
            check_id: check_id.into(),
            justification: None,
        }
    }

    /// Adds a justification.
    #[must_use]
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }
}

fn default_true() -> bool {
    true
}

/// A method declared by a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Compilation-unique identity.
    pub id: MethodId,
    /// Metadata name (`Dispose`, `System.IDisposable.Dispose`, `Finalize`).
    pub name: String,
    /// Method kind.
    #[serde(default)]
    pub kind: MethodKind,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// `static`
    #[serde(default)]
    pub is_static: bool,
    /// `virtual`
    #[serde(default)]
    pub is_virtual: bool,
    /// `abstract`
    #[serde(default)]
    pub is_abstract: bool,
    /// `override`
    #[serde(default)]
    pub is_override: bool,
    /// `sealed`
    #[serde(default)]
    pub is_sealed: bool,
    /// Whether the method returns nothing.
    #[serde(default = "default_true")]
    pub returns_void: bool,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Interface methods this method explicitly implements.
    #[serde(default)]
    pub explicit_implementations: Vec<MethodId>,
    /// Method overridden by this one, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden: Option<MethodId>,
    /// Resolved suppression attributes.
    #[serde(default)]
    pub suppressions: Vec<Suppression>,
    /// Operation tree of the body, if the method has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Operation>,
    /// Declaration site.
    #[serde(default)]
    pub location: Location,
}

impl MethodSymbol {
    /// Creates a private, non-virtual, void, parameterless ordinary method.
    #[must_use]
    pub fn new(id: impl Into<MethodId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: MethodKind::Ordinary,
            accessibility: Accessibility::Private,
            is_static: false,
            is_virtual: false,
            is_abstract: false,
            is_override: false,
            is_sealed: false,
            returns_void: true,
            parameters: Vec::new(),
            explicit_implementations: Vec::new(),
            overridden: None,
            suppressions: Vec::new(),
            body: None,
            location: Location::default(),
        }
    }

    /// Creates a finalizer (`~T()`), which is a protected override of `Finalize`.
    #[must_use]
    pub fn finalizer(id: impl Into<MethodId>) -> Self {
        let mut method = Self::new(id, "Finalize");
        method.kind = MethodKind::Finalizer;
        method.accessibility = Accessibility::Protected;
        method.is_override = true;
        method
    }

    /// Sets the method kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the declared accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Shorthand for public accessibility.
    #[must_use]
    pub fn public(self) -> Self {
        self.with_accessibility(Accessibility::Public)
    }

    /// Shorthand for protected accessibility.
    #[must_use]
    pub fn protected(self) -> Self {
        self.with_accessibility(Accessibility::Protected)
    }

    /// Marks the method `static`.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the method `virtual`.
    #[must_use]
    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Marks the method `abstract`.
    #[must_use]
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Marks the method `sealed`.
    #[must_use]
    pub fn as_sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Marks the method as overriding `overridden`.
    #[must_use]
    pub fn overriding(mut self, overridden: impl Into<MethodId>) -> Self {
        self.is_override = true;
        self.overridden = Some(overridden.into());
        self
    }

    /// Records an explicitly implemented interface method.
    #[must_use]
    pub fn implementing(mut self, interface_method: impl Into<MethodId>) -> Self {
        self.explicit_implementations.push(interface_method.into());
        self
    }

    /// Sets a non-void return.
    #[must_use]
    pub fn returning_value(mut self) -> Self {
        self.returns_void = false;
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a suppression attribute.
    #[must_use]
    pub fn with_suppression(mut self, suppression: Suppression) -> Self {
        self.suppressions.push(suppression);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: Operation) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the declaration site.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Whether this is a finalizer.
    #[must_use]
    pub fn is_finalizer(&self) -> bool {
        self.kind == MethodKind::Finalizer
    }

    /// Whether derived types can override this method.
    #[must_use]
    pub fn is_overridable(&self) -> bool {
        (self.is_virtual || self.is_abstract || self.is_override) && !self.is_sealed
    }

    /// Signature as shown in messages, e.g. `Dispose(bool)`.
    #[must_use]
    pub fn display_signature(&self) -> String {
        let params: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| keyword_alias(p.ty.as_str()))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Maps well-known runtime types to their C# keyword.
fn keyword_alias(ty: &str) -> &str {
    match ty {
        "System.Boolean" => "bool",
        "System.Object" => "object",
        "System.String" => "string",
        "System.Int32" => "int",
        "System.Int64" => "long",
        _ => simple_name(ty),
    }
}

fn simple_name(id: &str) -> &str {
    id.rsplit(['.', '+']).next().unwrap_or(id)
}

/// A named type declared in (or referenced by) the compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Fully qualified metadata name.
    pub id: TypeId,
    /// Type kind.
    #[serde(default)]
    pub kind: TypeKind,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// `sealed`
    #[serde(default)]
    pub is_sealed: bool,
    /// `abstract`
    #[serde(default)]
    pub is_abstract: bool,
    /// Immediate base type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeId>,
    /// Interfaces listed in the type's own declaration.
    #[serde(default)]
    pub interfaces: Vec<TypeId>,
    /// Methods declared by this type.
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    /// Resolved suppression attributes.
    #[serde(default)]
    pub suppressions: Vec<Suppression>,
    /// Declaration site.
    #[serde(default)]
    pub location: Location,
}

impl TypeSymbol {
    /// Creates an internal type of the given kind with no members.
    #[must_use]
    pub fn new(id: impl Into<TypeId>, kind: TypeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            accessibility: Accessibility::Internal,
            is_sealed: false,
            is_abstract: false,
            base_type: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            suppressions: Vec::new(),
            location: Location::default(),
        }
    }

    /// Creates a class.
    #[must_use]
    pub fn class(id: impl Into<TypeId>) -> Self {
        Self::new(id, TypeKind::Class)
    }

    /// Creates an interface.
    #[must_use]
    pub fn interface(id: impl Into<TypeId>) -> Self {
        Self::new(id, TypeKind::Interface)
    }

    /// Sets the declared accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Shorthand for public accessibility.
    #[must_use]
    pub fn public(self) -> Self {
        self.with_accessibility(Accessibility::Public)
    }

    /// Marks the type `sealed`.
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<TypeId>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    /// Adds a declared interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<TypeId>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodSymbol) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a suppression attribute.
    #[must_use]
    pub fn with_suppression(mut self, suppression: Suppression) -> Self {
        self.suppressions.push(suppression);
        self
    }

    /// Sets the declaration site.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Simple name (last segment of the metadata name).
    #[must_use]
    pub fn name(&self) -> &str {
        simple_name(self.id.as_str())
    }

    /// Containing namespace, empty for the global namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        let id = self.id.as_str();
        let name_start = id.len() - self.name().len();
        id[..name_start].trim_end_matches(['.', '+'])
    }

    /// Methods declared with the given name.
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodSymbol> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// The finalizer declared by this type, if any.
    #[must_use]
    pub fn finalizer(&self) -> Option<&MethodSymbol> {
        self.methods.iter().find(|m| m.is_finalizer())
    }

    /// Qualified method name as shown in messages, e.g. `Resource.Dispose(bool)`.
    #[must_use]
    pub fn qualified_method_name(&self, method: &MethodSymbol) -> String {
        format!("{}.{}", self.name(), method.display_signature())
    }
}
