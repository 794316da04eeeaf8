//! Diff and dependency display

use colored::Colorize;
use declarative::{DiffSummary, ResourceDiff, ResourceRef, group_by_type};
use std::collections::BTreeSet;

/// Display a list of diffs in a user-friendly format
pub fn display_diff(diffs: &[ResourceDiff]) {
    if diffs.is_empty() {
        println!();
        println!("  {} All resources in sync", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Configuration Diff".bold()
    );
    println!("│");

    for (resource_type, type_diffs) in group_by_type(diffs) {
        println!("│ {}", resource_type.bold());

        for diff in type_diffs {
            let (symbol, state_desc) = if diff.is_addition() {
                ("+".green(), "(not configured)")
            } else if diff.is_removal() {
                ("-".red(), "(will remove)")
            } else {
                ("~".yellow(), "")
            };

            println!(
                "│   {} {:<30} {}",
                symbol,
                diff.resource.title,
                state_desc.dimmed()
            );

            for change in &diff.changes {
                println!(
                    "│       {}: {} → {}",
                    change.property,
                    change.is.as_deref().unwrap_or("absent").dimmed(),
                    change.should
                );
            }
        }
        println!("│");
    }

    let summary = DiffSummary::from_diffs(diffs);

    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} changes ({} add, {} modify, {} remove)",
        summary.total().to_string().bold(),
        summary.additions.to_string().green(),
        summary.modifications.to_string().yellow(),
        summary.removals.to_string().red()
    );
    println!("└─────────────────────────────────────────────────────┘");
}

/// Display the autorequire edges of one resource
pub fn display_dependencies(resource: &ResourceRef, edges: &BTreeSet<ResourceRef>) {
    println!("{}", resource.to_string().bold());
    if edges.is_empty() {
        println!("  {}", "(no dependencies in catalog)".dimmed());
        return;
    }
    for edge in edges {
        println!("  {} {}", "←".cyan(), edge);
    }
}
