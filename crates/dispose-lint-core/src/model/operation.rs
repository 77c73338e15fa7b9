//! Operation trees for method bodies.
//!
//! The node set is closed: every kind the rules interpret has its own
//! variant, and everything else the front-end produces arrives as
//! [`OperationKind::Unmodeled`]. Whether an unmodeled node is acceptable is
//! decided explicitly by each consumer, never by a wildcard default.

use crate::model::symbol::{MethodId, TypeId};
use serde::{Deserialize, Serialize};

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// `true` / `false`
    Bool(bool),
    /// Integral constant.
    Int(i64),
    /// String constant.
    String(String),
    /// `null`
    Null,
}

/// An argument passed to an invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument value.
    pub value: Operation,
    /// Name of the matched parameter, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Whether the argument was synthesized (e.g., a default value).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_implicit: bool,
}

impl Argument {
    /// Creates an explicit argument.
    #[must_use]
    pub fn new(value: Operation) -> Self {
        Self {
            value,
            parameter: None,
            is_implicit: false,
        }
    }

    /// Records the parameter this argument binds to.
    #[must_use]
    pub fn for_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

/// Kind-specific payload of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationKind {
    /// `{ ... }`
    Block {
        /// Statements in order.
        #[serde(default)]
        operations: Vec<Operation>,
    },
    /// An expression used as a statement.
    ExpressionStatement {
        /// The expression.
        operation: Box<Operation>,
    },
    /// A method call.
    Invocation {
        /// Called method.
        target: MethodId,
        /// Receiver, absent for static calls.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        instance: Option<Box<Operation>>,
        /// Arguments in parameter order.
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    /// A type conversion.
    Conversion {
        /// Converted value.
        operand: Box<Operation>,
        /// Target type.
        #[serde(rename = "type")]
        ty: TypeId,
    },
    /// `this` / `Me`.
    InstanceReference {
        /// Static type of the reference.
        #[serde(rename = "type")]
        ty: TypeId,
    },
    /// A literal constant.
    Literal {
        /// Constant value.
        value: ConstantValue,
    },
    /// `try { } catch { } finally { }`
    Try {
        /// Protected body.
        body: Box<Operation>,
        /// Catch clauses.
        #[serde(default)]
        catches: Vec<Operation>,
        /// Finally block.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        finally: Option<Box<Operation>>,
    },
    /// `;`
    Empty,
    /// `label: statement`
    Labeled {
        /// Label name.
        label: String,
        /// Labeled statement, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operation: Option<Box<Operation>>,
    },
    /// `return` with optional value.
    Return {
        /// Returned value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<Operation>>,
    },
    /// Any node the rules do not interpret.
    Unmodeled {
        /// Front-end kind name (e.g., `If`, `Throw`, `None`).
        name: String,
        /// Set for placeholder roots of constructs the front-end has no model for.
        #[serde(default)]
        no_model: bool,
        /// Child nodes, kept for completeness.
        #[serde(default)]
        children: Vec<Operation>,
    },
}

/// A node of a method body's operation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Whether the node was synthesized by the compiler.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_implicit: bool,
    /// Kind and children.
    #[serde(flatten)]
    pub kind: OperationKind,
}

impl Operation {
    /// Creates an explicit node.
    #[must_use]
    pub fn new(kind: OperationKind) -> Self {
        Self {
            is_implicit: false,
            kind,
        }
    }

    /// Marks the node as compiler-synthesized.
    #[must_use]
    pub fn implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }

    /// `{ operations }`
    #[must_use]
    pub fn block(operations: Vec<Operation>) -> Self {
        Self::new(OperationKind::Block { operations })
    }

    /// `operation;`
    #[must_use]
    pub fn expression_statement(operation: Operation) -> Self {
        Self::new(OperationKind::ExpressionStatement {
            operation: Box::new(operation),
        })
    }

    /// `instance.target(arguments)` or `target(arguments)` when static.
    #[must_use]
    pub fn invocation(
        target: impl Into<MethodId>,
        instance: Option<Operation>,
        arguments: Vec<Argument>,
    ) -> Self {
        Self::new(OperationKind::Invocation {
            target: target.into(),
            instance: instance.map(Box::new),
            arguments,
        })
    }

    /// `(ty)operand`
    #[must_use]
    pub fn conversion(operand: Operation, ty: impl Into<TypeId>) -> Self {
        Self::new(OperationKind::Conversion {
            operand: Box::new(operand),
            ty: ty.into(),
        })
    }

    /// `this` typed as `ty`.
    #[must_use]
    pub fn this(ty: impl Into<TypeId>) -> Self {
        Self::new(OperationKind::InstanceReference { ty: ty.into() })
    }

    /// A literal constant.
    #[must_use]
    pub fn literal(value: ConstantValue) -> Self {
        Self::new(OperationKind::Literal { value })
    }

    /// `try { body } finally { finally }`
    #[must_use]
    pub fn try_finally(body: Operation, finally: Operation) -> Self {
        Self::new(OperationKind::Try {
            body: Box::new(body),
            catches: Vec::new(),
            finally: Some(Box::new(finally)),
        })
    }

    /// `;`
    #[must_use]
    pub fn empty() -> Self {
        Self::new(OperationKind::Empty)
    }

    /// `label: operation`
    #[must_use]
    pub fn labeled(label: impl Into<String>, operation: Option<Operation>) -> Self {
        Self::new(OperationKind::Labeled {
            label: label.into(),
            operation: operation.map(Box::new),
        })
    }

    /// `return;`
    #[must_use]
    pub fn ret() -> Self {
        Self::new(OperationKind::Return { value: None })
    }

    /// A node of kind `name` the rules do not interpret.
    #[must_use]
    pub fn unmodeled(name: impl Into<String>, no_model: bool) -> Self {
        Self::new(OperationKind::Unmodeled {
            name: name.into(),
            no_model,
            children: Vec::new(),
        })
    }

    /// Constant value of this node, if it is a literal.
    #[must_use]
    pub fn constant_value(&self) -> Option<&ConstantValue> {
        match &self.kind {
            OperationKind::Literal { value } => Some(value),
            _ => None,
        }
    }
}
