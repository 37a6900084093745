//! List strategies command.

use anyhow::Result;
use quantsim_strategies::StrategyRegistry;

pub fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    let mut infos = registry.list();
    infos.sort_by(|a, b| a.name.cmp(&b.name));
    for info in infos {
        println!("  {} ", info.name);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!();
    }

    println!("Use --strategy <name> to select a strategy.");
    println!();
    let mut names = registry.names();
    names.sort();
    println!(
        "Strategy names: {}",
        names
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
