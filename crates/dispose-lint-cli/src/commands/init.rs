//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dispose-lint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Lowest severity that fails the run: "error" (default), "warning" or "info"
# fail_on = "warning"

[analyzer]
# Glob patterns over fully qualified type names to skip
exclude = [
    "*.Generated.*",
]

# Worker threads (default: one per CPU)
# parallelism = 4

# Rule configurations
# Each rule can be enabled/disabled, have its severity overridden,
# and be limited to types of certain accessibility.

[rules.dispose-implementation]
enabled = true
# severity = "warning"  # Override default severity
# api_surface = ["public", "protected", "protected_internal"]

[rules.finalize-implementation]
enabled = true

# [rules.provide-dispose-bool]
# api_surface = ["public"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("dispose-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created dispose-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit dispose-lint.toml to configure rules");
    println!("  2. Run: dispose-lint check <model.json>");

    Ok(())
}
