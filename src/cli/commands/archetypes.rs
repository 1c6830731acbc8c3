//! Archetypes Command
//!
//! List the archetype catalog in tie-break order.

use console::style;

use crate::cli::CommandContext;
use crate::persona::{ArchetypeProfile, CATALOG};
use crate::types::Result;

pub fn run(ctx: &CommandContext) -> Result<()> {
    let profiles: Vec<ArchetypeProfile> = CATALOG.iter().map(|a| a.to_profile()).collect();
    if ctx.print_structured(&profiles)? {
        return Ok(());
    }

    for profile in &profiles {
        ctx.output
            .header(&format!("{} {}", profile.emoji, profile.name));
        println!("{}", profile.description);
        for requirement in &profile.requirements {
            println!("  {} {}", style("›").dim(), requirement);
        }
        println!(
            "  {} {}",
            style("Best match:").dim(),
            profile.compatibility.archetype
        );
    }
    Ok(())
}
