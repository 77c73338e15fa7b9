//! Check command implementation.

use anyhow::{Context, Result};
use dispose_lint_core::{Analyzer, Config, LintResult, RuleBox};
use dispose_lint_rules::{all_rules, recommended_rules, Preset};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    models: &[PathBuf],
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    jobs: Option<usize>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;
    let threshold = config.fail_threshold();

    let rules_to_add = if let Some(filter) = rules_filter {
        let rule_names: Vec<&str> = filter.split(',').map(str::trim).collect();
        filter_rules(&rule_names)
    } else {
        preset_rules(&config)
    };

    let mut builder = Analyzer::builder().config(config).excludes(exclude);
    if let Some(jobs) = jobs {
        builder = builder.parallelism(jobs);
    }
    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    let mut result = LintResult::new();
    for model in models {
        tracing::info!(
            "Analyzing {} with {} rules",
            model.display(),
            analyzer.rule_count()
        );
        let model_result = analyzer
            .analyze_file(model)
            .with_context(|| format!("Analysis of {} failed", model.display()))?;
        result.extend(model_result);
    }
    result.sort();

    super::output::print(&result, format)?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn preset_rules(config: &Config) -> Vec<RuleBox> {
    match config.preset.as_deref() {
        None => recommended_rules(),
        Some(name) => Preset::from_name(name).map_or_else(
            || {
                tracing::warn!("Unknown preset '{}', using recommended", name);
                recommended_rules()
            },
            Preset::rules,
        ),
    }
}

fn filter_rules(names: &[&str]) -> Vec<RuleBox> {
    let mut available = all_rules();
    let mut rules = Vec::new();

    for name in names {
        match available
            .iter()
            .position(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name))
        {
            Some(index) => rules.push(available.swap_remove(index)),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}
