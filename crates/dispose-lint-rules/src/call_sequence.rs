//! Required-call sequence matching over release and finalizer bodies.
//!
//! A body is walked statement by statement as a pure function of
//! `(statements, progress)`. Progress only moves forward:
//!
//! ```text
//! AwaitingFlagRelease --Dispose(flag)--> AwaitingSuppressFinalize --GC.SuppressFinalize(this)--> Complete
//! ```
//!
//! The finalizer sequence skips the middle state. Once complete, only
//! pass-through nodes may follow.

use dispose_lint_core::model::{ConstantValue, MethodId, Operation, OperationKind, TypeId};
use dispose_lint_core::CancellationToken;

/// How far a body has progressed through the required calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Nothing matched yet; the next statement must call `Dispose(flag)`.
    AwaitingFlagRelease,
    /// `Dispose(flag)` matched; the next statement must call `GC.SuppressFinalize(this)`.
    AwaitingSuppressFinalize,
    /// Every required call matched.
    Complete,
}

/// A statement that breaks the required sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Outcome of walking one statement or statement list.
pub type Step = Result<Progress, Rejected>;

/// Verdict on a whole method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The body performs exactly the required calls.
    Valid,
    /// The body deviates from the required calls.
    Invalid,
}

impl Verdict {
    /// Returns true for [`Verdict::Valid`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// The call sequence one method body must perform.
#[derive(Debug, Clone, Copy)]
pub struct CallSequence<'a> {
    declaring_type: &'a TypeId,
    flag_release: &'a MethodId,
    suppress_finalize: Option<&'a MethodId>,
    disposing: bool,
    base_chaining: bool,
}

impl<'a> CallSequence<'a> {
    /// `Dispose(true); GC.SuppressFinalize(this);` for a release-entry body.
    #[must_use]
    pub fn release(
        declaring_type: &'a TypeId,
        flag_release: &'a MethodId,
        suppress_finalize: &'a MethodId,
    ) -> Self {
        Self {
            declaring_type,
            flag_release,
            suppress_finalize: Some(suppress_finalize),
            disposing: true,
            base_chaining: false,
        }
    }

    /// `Dispose(false);` for a finalizer body, optionally wrapped by the
    /// compiler in `try { .. } finally { base.Finalize(); }`.
    #[must_use]
    pub fn finalizer(declaring_type: &'a TypeId, flag_release: &'a MethodId) -> Self {
        Self {
            declaring_type,
            flag_release,
            suppress_finalize: None,
            disposing: false,
            base_chaining: true,
        }
    }

    /// Validates a whole body.
    ///
    /// Returns `None` without a verdict when the analysis was cancelled.
    #[must_use]
    pub fn validate(&self, body: &Operation, cancellation: &CancellationToken) -> Option<Verdict> {
        if cancellation.is_cancelled() {
            return None;
        }
        let verdict = match self.step(body, Progress::AwaitingFlagRelease) {
            Ok(Progress::Complete) => Verdict::Valid,
            Ok(_) | Err(Rejected) => Verdict::Invalid,
        };
        Some(verdict)
    }

    /// Walks `statements` in order starting from `progress`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] at the first statement that does not fit.
    pub fn walk(&self, statements: &[Operation], progress: Progress) -> Step {
        statements
            .iter()
            .try_fold(progress, |progress, statement| self.step(statement, progress))
    }

    /// Walks one statement.
    ///
    /// # Errors
    ///
    /// Returns [`Rejected`] if the statement does not fit at `progress`.
    pub fn step(&self, statement: &Operation, progress: Progress) -> Step {
        match &statement.kind {
            OperationKind::Block { operations } => self.walk(operations, progress),
            OperationKind::Empty => Ok(progress),
            OperationKind::Labeled { operation, .. } => match operation {
                Some(labeled) => self.step(labeled, progress),
                None => Ok(progress),
            },
            OperationKind::Return { value: None } if statement.is_implicit => Ok(progress),
            OperationKind::Unmodeled { no_model: true, .. } => Ok(progress),
            OperationKind::ExpressionStatement { operation } if !statement.is_implicit => {
                self.expect_call(operation, progress)
            }
            OperationKind::Try {
                body,
                catches,
                finally: Some(finally),
            } if self.base_chaining
                && progress == Progress::AwaitingFlagRelease
                && statement.is_implicit
                && finally.is_implicit
                && catches.is_empty() =>
            {
                let inner = Self {
                    base_chaining: false,
                    ..*self
                };
                match inner.step(body, progress)? {
                    Progress::Complete => Ok(Progress::Complete),
                    _ => Err(Rejected),
                }
            }
            OperationKind::ExpressionStatement { .. }
            | OperationKind::Invocation { .. }
            | OperationKind::Conversion { .. }
            | OperationKind::InstanceReference { .. }
            | OperationKind::Literal { .. }
            | OperationKind::Try { .. }
            | OperationKind::Return { .. }
            | OperationKind::Unmodeled { .. } => Err(Rejected),
        }
    }

    fn expect_call(&self, expression: &Operation, progress: Progress) -> Step {
        match progress {
            Progress::AwaitingFlagRelease if self.is_flag_release_call(expression) => {
                Ok(if self.suppress_finalize.is_some() {
                    Progress::AwaitingSuppressFinalize
                } else {
                    Progress::Complete
                })
            }
            Progress::AwaitingSuppressFinalize if self.is_suppress_finalize_call(expression) => {
                Ok(Progress::Complete)
            }
            _ => Err(Rejected),
        }
    }

    /// `this.Dispose(<flag>)` with a single literal boolean argument.
    fn is_flag_release_call(&self, expression: &Operation) -> bool {
        let OperationKind::Invocation {
            target,
            instance: Some(instance),
            arguments,
        } = &expression.kind
        else {
            return false;
        };
        target == self.flag_release
            && self.is_this(instance)
            && matches!(
                arguments.as_slice(),
                [argument] if argument.value.constant_value() == Some(&ConstantValue::Bool(self.disposing))
            )
    }

    /// `GC.SuppressFinalize((object)this)`.
    fn is_suppress_finalize_call(&self, expression: &Operation) -> bool {
        let Some(suppress_finalize) = self.suppress_finalize else {
            return false;
        };
        let OperationKind::Invocation {
            target, arguments, ..
        } = &expression.kind
        else {
            return false;
        };
        target == suppress_finalize
            && matches!(
                arguments.as_slice(),
                [argument] if matches!(
                    &argument.value.kind,
                    OperationKind::Conversion { operand, .. } if self.is_this(operand)
                )
            )
    }

    fn is_this(&self, operation: &Operation) -> bool {
        matches!(&operation.kind, OperationKind::InstanceReference { ty } if ty == self.declaring_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        dispose_call, implicit_return, statement, suppress_call, DISPOSE_BOOL, RESOURCE,
        SUPPRESS_FINALIZE,
    };
    use dispose_lint_core::model::Argument;

    fn ids() -> (TypeId, MethodId, MethodId) {
        (
            TypeId::new(RESOURCE),
            MethodId::new(DISPOSE_BOOL),
            MethodId::new(SUPPRESS_FINALIZE),
        )
    }

    fn release(body: Vec<Operation>) -> Option<Verdict> {
        let (ty, flag, suppress) = ids();
        CallSequence::release(&ty, &flag, &suppress)
            .validate(&Operation::block(body), &CancellationToken::new())
    }

    fn finalizer(body: Operation) -> Option<Verdict> {
        let (ty, flag, _) = ids();
        CallSequence::finalizer(&ty, &flag).validate(&body, &CancellationToken::new())
    }

    fn base_chained(inner: Vec<Operation>) -> Operation {
        let base_finalize = statement(Operation::invocation(
            "System.Object.Finalize()",
            Some(Operation::this("System.Object")),
            vec![],
        ))
        .implicit();
        Operation::block(vec![
            Operation::try_finally(
                Operation::block(inner),
                Operation::block(vec![base_finalize]).implicit(),
            )
            .implicit(),
            implicit_return(),
        ])
    }

    #[test]
    fn release_in_order_is_valid() {
        let verdict = release(vec![
            dispose_call(true),
            suppress_call(),
            implicit_return(),
        ]);
        assert_eq!(verdict, Some(Verdict::Valid));
    }

    #[test]
    fn release_swapped_order_is_invalid() {
        let verdict = release(vec![suppress_call(), dispose_call(true), implicit_return()]);
        assert_eq!(verdict, Some(Verdict::Invalid));
    }

    #[test]
    fn release_without_suppression_is_invalid() {
        assert_eq!(
            release(vec![dispose_call(true), implicit_return()]),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn release_rejects_extra_statements_anywhere() {
        let extra = || {
            statement(Operation::invocation(
                "System.Console.WriteLine(string)",
                None,
                vec![Argument::new(Operation::literal(ConstantValue::String(
                    "bye".into(),
                )))],
            ))
        };
        for position in 0..3 {
            let mut body = vec![dispose_call(true), suppress_call()];
            body.insert(position, extra());
            assert_eq!(
                release(body),
                Some(Verdict::Invalid),
                "extra statement at {position}"
            );
        }
    }

    #[test]
    fn release_with_wrong_flag_is_invalid() {
        assert_eq!(
            release(vec![dispose_call(false), suppress_call()]),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn release_tolerates_pass_through_nodes() {
        let verdict = release(vec![
            Operation::empty(),
            Operation::block(vec![dispose_call(true)]),
            Operation::labeled("done", None),
            Operation::labeled("again", Some(suppress_call())),
            Operation::block(vec![]).implicit(),
            implicit_return(),
        ]);
        assert_eq!(verdict, Some(Verdict::Valid));
    }

    #[test]
    fn release_rejects_explicit_return_and_implicit_statements() {
        let explicit_return = Operation::ret();
        assert_eq!(
            release(vec![dispose_call(true), suppress_call(), explicit_return]),
            Some(Verdict::Invalid)
        );

        let implicit_statement = dispose_call(true).implicit();
        assert_eq!(
            release(vec![implicit_statement, suppress_call()]),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn release_with_suppression_on_other_instance_is_invalid() {
        let other = statement(Operation::invocation(
            SUPPRESS_FINALIZE,
            None,
            vec![Argument::new(Operation::conversion(
                Operation::this("Demo.Other"),
                "System.Object",
            ))],
        ));
        assert_eq!(
            release(vec![dispose_call(true), other]),
            Some(Verdict::Invalid)
        );

        let unconverted = statement(Operation::invocation(
            SUPPRESS_FINALIZE,
            None,
            vec![Argument::new(Operation::this(RESOURCE))],
        ));
        assert_eq!(
            release(vec![dispose_call(true), unconverted]),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn no_model_roots_are_accepted() {
        let verdict = release(vec![
            Operation::unmodeled("None", true),
            dispose_call(true),
            suppress_call(),
        ]);
        assert_eq!(verdict, Some(Verdict::Valid));

        let modeled = release(vec![
            Operation::unmodeled("If", false),
            dispose_call(true),
            suppress_call(),
        ]);
        assert_eq!(modeled, Some(Verdict::Invalid));
    }

    #[test]
    fn finalizer_simple_body() {
        assert_eq!(
            finalizer(Operation::block(vec![dispose_call(false), implicit_return()])),
            Some(Verdict::Valid)
        );
        assert_eq!(
            finalizer(Operation::block(vec![dispose_call(true)])),
            Some(Verdict::Invalid)
        );
        assert_eq!(
            finalizer(Operation::block(vec![implicit_return()])),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn finalizer_with_trailing_statement_is_invalid() {
        let write_line = statement(Operation::invocation(
            "System.Console.WriteLine(string)",
            None,
            vec![Argument::new(Operation::literal(ConstantValue::String(
                "bye".into(),
            )))],
        ));
        assert_eq!(
            finalizer(Operation::block(vec![dispose_call(false), write_line])),
            Some(Verdict::Invalid)
        );
    }

    #[test]
    fn finalizer_base_chaining_wrapper() {
        assert_eq!(
            finalizer(base_chained(vec![dispose_call(false)])),
            Some(Verdict::Valid)
        );
        assert_eq!(
            finalizer(base_chained(vec![dispose_call(true)])),
            Some(Verdict::Invalid)
        );
        assert_eq!(finalizer(base_chained(vec![])), Some(Verdict::Invalid));
    }

    #[test]
    fn wrapper_finally_is_not_inspected() {
        let finally = Operation::block(vec![
            crate::test_support::write_line(),
            Operation::unmodeled("Throw", false),
        ])
        .implicit();
        let body = Operation::block(vec![
            Operation::try_finally(Operation::block(vec![dispose_call(false)]), finally).implicit(),
            implicit_return(),
        ]);
        assert_eq!(finalizer(body), Some(Verdict::Valid));
    }

    #[test]
    fn explicit_try_is_not_traversed() {
        let explicit = Operation::block(vec![Operation::try_finally(
            Operation::block(vec![dispose_call(false)]),
            Operation::block(vec![]).implicit(),
        )]);
        assert_eq!(finalizer(explicit), Some(Verdict::Invalid));

        let explicit_finally = Operation::block(vec![Operation::try_finally(
            Operation::block(vec![dispose_call(false)]),
            Operation::block(vec![]),
        )
        .implicit()]);
        assert_eq!(finalizer(explicit_finally), Some(Verdict::Invalid));
    }

    #[test]
    fn wrapper_is_only_trusted_once_and_before_the_call() {
        let nested = base_chained(vec![base_chained(vec![dispose_call(false)])]);
        assert_eq!(finalizer(nested), Some(Verdict::Invalid));

        let (ty, flag, suppress) = ids();
        let wrapped_release = base_chained(vec![dispose_call(true), suppress_call()]);
        let verdict = CallSequence::release(&ty, &flag, &suppress)
            .validate(&wrapped_release, &CancellationToken::new());
        assert_eq!(verdict, Some(Verdict::Invalid));
    }

    #[test]
    fn walk_threads_progress() {
        let (ty, flag, suppress) = ids();
        let sequence = CallSequence::release(&ty, &flag, &suppress);
        assert_eq!(
            sequence.walk(&[dispose_call(true)], Progress::AwaitingFlagRelease),
            Ok(Progress::AwaitingSuppressFinalize)
        );
        assert_eq!(
            sequence.walk(&[suppress_call()], Progress::AwaitingSuppressFinalize),
            Ok(Progress::Complete)
        );
        assert_eq!(
            sequence.walk(&[Operation::empty()], Progress::Complete),
            Ok(Progress::Complete)
        );
        assert_eq!(
            sequence.walk(&[dispose_call(true)], Progress::Complete),
            Err(Rejected)
        );
    }

    #[test]
    fn verdict_is_idempotent() {
        let (ty, flag, suppress) = ids();
        let sequence = CallSequence::release(&ty, &flag, &suppress);
        let body = Operation::block(vec![dispose_call(true), suppress_call()]);
        let token = CancellationToken::new();
        let first = sequence.validate(&body, &token);
        for _ in 0..3 {
            assert_eq!(sequence.validate(&body, &token), first);
        }
    }

    #[test]
    fn cancelled_walk_has_no_verdict() {
        let (ty, flag, suppress) = ids();
        let token = CancellationToken::new();
        token.cancel();
        let verdict = CallSequence::release(&ty, &flag, &suppress)
            .validate(&Operation::block(vec![dispose_call(true)]), &token);
        assert_eq!(verdict, None);
    }
}
