//! Core analyzer for orchestrating lint execution.

use crate::cancel::CancellationToken;
use crate::capability::CapabilityDescriptor;
use crate::config::Config;
use crate::context::TypeContext;
use crate::model::{Compilation, ModelError, TypeSymbol};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The compilation model could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Glob pattern error.
    #[error("Invalid exclude pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The analysis pass was cancelled; no partial results are returned.
    #[error("Analysis cancelled")]
    Cancelled,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    parallelism: Option<usize>,
    cancellation: Option<CancellationToken>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a glob pattern over fully qualified type names to skip.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the number of worker threads (default: from config, else rayon's global pool).
    #[must_use]
    pub fn parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Sets the cancellation token the host uses to stop analysis.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob or the
    /// worker pool cannot be created.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.analyzer.exclude.iter().cloned());
        let exclude = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let pool = match self.parallelism.or(config.analyzer.parallelism) {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("dispose-lint-{i}"))
                    .build()?,
            ),
            None => None,
        };

        Ok(Analyzer {
            rules: self.rules,
            exclude,
            config,
            pool,
            cancellation: self.cancellation.unwrap_or_default(),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    exclude: Vec<glob::Pattern>,
    config: Config,
    pool: Option<rayon::ThreadPool>,
    cancellation: CancellationToken,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the cancellation token observed by this analyzer.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Loads a JSON compilation model and analyzes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be loaded or analysis is cancelled.
    pub fn analyze_file(&self, path: &Path) -> Result<LintResult, AnalyzerError> {
        debug!("Loading model: {}", path.display());
        let compilation = Compilation::from_file(path)?;
        self.analyze(&compilation)
    }

    /// Analyzes every type of a compilation and returns the results.
    ///
    /// The capability is resolved once and shared read-only by all workers.
    /// If the compilation does not define it, nothing is reported.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Cancelled`] if the token was cancelled
    /// before the pass completed.
    pub fn analyze(&self, compilation: &Compilation) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis of {}", compilation.assembly());

        let mut result = LintResult::new();

        let Some(capability) = CapabilityDescriptor::resolve(compilation) else {
            info!("IDisposable or GC.SuppressFinalize not defined; skipping dependent rules");
            return Ok(result);
        };

        let types: Vec<&TypeSymbol> = compilation
            .types()
            .iter()
            .filter(|ty| {
                let excluded = self.should_exclude(ty);
                if excluded {
                    debug!("Excluding: {}", ty.id);
                }
                !excluded
            })
            .collect();

        info!("Found {} types to analyze", types.len());

        let run = || {
            types
                .par_iter()
                .map(|ty| self.analyze_type(compilation, &capability, ty))
                .collect::<Vec<_>>()
        };
        let per_type = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        if self.cancellation.is_cancelled() {
            warn!("Analysis of {} cancelled", compilation.assembly());
            return Err(AnalyzerError::Cancelled);
        }

        result.violations = per_type.into_iter().flatten().collect();
        result.types_checked = types.len();
        result.sort();

        info!(
            "Analysis complete: {} violations in {} types",
            result.violations.len(),
            result.types_checked
        );

        Ok(result)
    }

    /// Runs every applicable rule on one type.
    fn analyze_type(
        &self,
        compilation: &Compilation,
        capability: &CapabilityDescriptor,
        ty: &TypeSymbol,
    ) -> Vec<Violation> {
        if self.cancellation.is_cancelled() {
            return Vec::new();
        }

        let ctx = TypeContext::new(compilation, capability, ty, &self.cancellation);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            if !self.config.rule_applies_to(rule.name(), ty.accessibility) {
                debug!("{} outside api surface of {}", ty.id, rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx);
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        violations
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Checks if a type should be excluded.
    fn should_exclude(&self, ty: &TypeSymbol) -> bool {
        self.exclude.iter().any(|p| p.matches(ty.id.as_str()))
    }
}
