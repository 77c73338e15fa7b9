//! List rules command implementation.

use dispose_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<30} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!(
            "{:<8} {:<30} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - DL001-DL004, DL006, DL007 (default)");
    println!("  strict       - All rules, every finding an error");
    println!("  minimal      - DL001, DL002 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  dispose-lint check model.json --rules dispose-implementation,finalize-implementation");
    println!("  dispose-lint check model.json --rules DL001,DL002");
}
