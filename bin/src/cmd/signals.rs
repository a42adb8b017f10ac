//! Signal listing command implementation.

use almeria::signals::{SignalCategory, registry::signals_by_category};
use almeria::traits::Orientation;
use anyhow::Result;

/// List available signals, optionally filtered by category.
pub(crate) fn list_signals(category: Option<String>, verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Available Signals                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for cat in SignalCategory::all() {
        let cat_name = format!("{cat:?}");
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        let signals = signals_by_category(&cat);
        if signals.is_empty() {
            continue;
        }

        println!("{} - {}:", cat_name, cat.description());
        println!("{}", "-".repeat(60));

        for info in signals {
            if verbose {
                let direction = match info.orientation {
                    Orientation::HigherIsBetter => "higher is better",
                    Orientation::LowerIsBetter => "lower is better",
                };
                let benchmark = if info.requires_benchmark { ", needs benchmark" } else { "" };
                println!("  {:20} - {}", info.name, info.description);
                println!(
                    "  {:20}   (window: {} bars, {direction}{benchmark})",
                    "", info.default_window
                );
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed signal descriptions.\n");
    }

    Ok(())
}
