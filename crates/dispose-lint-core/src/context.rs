//! Context types for rule execution.

use crate::cancel::CancellationToken;
use crate::capability::CapabilityDescriptor;
use crate::model::{Compilation, TypeSymbol};
use crate::scanner::{CandidateScan, CandidateScanner};

/// Context provided to rules for one type.
///
/// Everything a rule may consult is reachable from here: the compilation,
/// the capability resolved once for the whole analysis, the type under
/// inspection with its candidate scan, and the cancellation signal.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    /// The compilation being analyzed.
    pub compilation: &'a Compilation,
    /// Capability resolved for this compilation.
    pub capability: &'a CapabilityDescriptor,
    /// Type under inspection.
    pub ty: &'a TypeSymbol,
    /// Candidate scan of `ty`.
    pub scan: CandidateScan<'a>,
    /// Cancellation signal for the analysis pass.
    pub cancellation: &'a CancellationToken,
}

impl<'a> TypeContext<'a> {
    /// Creates a context for `ty`, scanning it for disposal candidates.
    #[must_use]
    pub fn new(
        compilation: &'a Compilation,
        capability: &'a CapabilityDescriptor,
        ty: &'a TypeSymbol,
        cancellation: &'a CancellationToken,
    ) -> Self {
        let scan = CandidateScanner::new(compilation, capability).scan(ty);
        Self {
            compilation,
            capability,
            ty,
            scan,
            cancellation,
        }
    }

    /// Scanner over the same compilation and capability.
    #[must_use]
    pub fn scanner(&self) -> CandidateScanner<'a> {
        CandidateScanner::new(self.compilation, self.capability)
    }

    /// Whether the analysis pass has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
