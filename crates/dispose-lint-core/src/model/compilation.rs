//! The type universe of one compiled program.

use crate::model::symbol::{MethodId, MethodSymbol, TypeId, TypeSymbol};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a compilation model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// IO error reading a model file.
    #[error("Failed to read model file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Malformed JSON.
    #[error("Failed to parse model: {0}")]
    Json(#[from] serde_json::Error),

    /// Two types share a metadata name.
    #[error("Duplicate type `{0}`")]
    DuplicateType(TypeId),

    /// Two methods share an id.
    #[error("Duplicate method `{0}`")]
    DuplicateMethod(MethodId),

    /// A type is its own (transitive) base type.
    #[error("Inheritance cycle through `{0}`")]
    InheritanceCycle(TypeId),
}

/// Serialized shape of a [`Compilation`], validated on conversion.
#[derive(Debug, Deserialize)]
struct CompilationData {
    #[serde(default)]
    assembly: String,
    #[serde(default)]
    types: Vec<TypeSymbol>,
}

impl TryFrom<CompilationData> for Compilation {
    type Error = ModelError;

    fn try_from(data: CompilationData) -> Result<Self, Self::Error> {
        Self::new(data.assembly, data.types)
    }
}

/// An immutable, indexed view of every type known to one compiled program.
///
/// Types that are only referenced (e.g., runtime library types) may be
/// absent; lookups of unknown ids return `None` and never match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CompilationData")]
pub struct Compilation {
    assembly: String,
    types: Vec<TypeSymbol>,
    #[serde(skip)]
    type_index: HashMap<TypeId, usize>,
    #[serde(skip)]
    method_index: HashMap<MethodId, (usize, usize)>,
}

impl Compilation {
    /// Builds and validates a compilation.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate type or method ids, or on base-type cycles.
    pub fn new(assembly: impl Into<String>, types: Vec<TypeSymbol>) -> Result<Self, ModelError> {
        let mut type_index = HashMap::with_capacity(types.len());
        let mut method_index = HashMap::new();

        for (ti, ty) in types.iter().enumerate() {
            if type_index.insert(ty.id.clone(), ti).is_some() {
                return Err(ModelError::DuplicateType(ty.id.clone()));
            }
            for (mi, method) in ty.methods.iter().enumerate() {
                if method_index.insert(method.id.clone(), (ti, mi)).is_some() {
                    return Err(ModelError::DuplicateMethod(method.id.clone()));
                }
            }
        }

        let compilation = Self {
            assembly: assembly.into(),
            types,
            type_index,
            method_index,
        };
        compilation.check_inheritance()?;
        Ok(compilation)
    }

    /// Parses a compilation from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the model is invalid.
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a compilation from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    fn check_inheritance(&self) -> Result<(), ModelError> {
        for ty in &self.types {
            let mut seen = HashSet::new();
            let mut current = Some(ty);
            while let Some(t) = current {
                if !seen.insert(&t.id) {
                    return Err(ModelError::InheritanceCycle(ty.id.clone()));
                }
                current = t.base_type.as_ref().and_then(|b| self.get_type(b));
            }
        }
        Ok(())
    }

    /// Name of the compiled assembly.
    #[must_use]
    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// All types, in declaration order.
    #[must_use]
    pub fn types(&self) -> &[TypeSymbol] {
        &self.types
    }

    /// Looks up a type by metadata name.
    #[must_use]
    pub fn get_type(&self, id: &TypeId) -> Option<&TypeSymbol> {
        self.type_index.get(id).map(|&i| &self.types[i])
    }

    /// Looks up a type by metadata name given as a string.
    #[must_use]
    pub fn find_type(&self, id: &str) -> Option<&TypeSymbol> {
        self.get_type(&TypeId::new(id))
    }

    /// Looks up a method and its declaring type.
    #[must_use]
    pub fn get_method(&self, id: &MethodId) -> Option<(&TypeSymbol, &MethodSymbol)> {
        self.method_index.get(id).map(|&(ti, mi)| {
            let ty = &self.types[ti];
            (ty, &ty.methods[mi])
        })
    }

    /// Base types of `ty`, nearest first. Unknown bases end the chain.
    pub fn base_types<'a>(&'a self, ty: &'a TypeSymbol) -> impl Iterator<Item = &'a TypeSymbol> {
        std::iter::successors(
            ty.base_type.as_ref().and_then(|b| self.get_type(b)),
            move |t| t.base_type.as_ref().and_then(|b| self.get_type(b)),
        )
        .take(self.types.len())
    }

    /// Whether `interface` is `target` or extends it through interface inheritance.
    #[must_use]
    pub fn interface_extends(&self, interface: &TypeId, target: &TypeId) -> bool {
        let mut stack = vec![interface];
        let mut seen = HashSet::new();
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(ty) = self.get_type(id) {
                stack.extend(ty.interfaces.iter());
            }
        }
        false
    }

    /// Whether any interface declared directly on `ty` is or extends `target`.
    #[must_use]
    pub fn declares_interface(&self, ty: &TypeSymbol, target: &TypeId) -> bool {
        ty.interfaces
            .iter()
            .any(|i| self.interface_extends(i, target))
    }
}
