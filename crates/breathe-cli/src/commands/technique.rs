use clap::Subcommand;
use serde::Serialize;

use breathe_core::{Catalog, Config};

use crate::i18n;

#[derive(Subcommand)]
pub enum TechniqueAction {
    /// List available techniques
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one technique in detail
    Show {
        /// Technique ID (e.g. "box", "wim-hof")
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct TechniqueRow<'a> {
    id: &'a str,
    name: &'a str,
    pattern: String,
    cycle_secs: f64,
    default_cycles: u32,
    max_cycles: u32,
}

pub fn run(action: TechniqueAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TechniqueAction::List { json } => {
            let catalog = Catalog::builtin();
            if json {
                let rows: Vec<TechniqueRow> = catalog
                    .iter()
                    .map(|t| TechniqueRow {
                        id: &t.id,
                        name: &t.name,
                        pattern: t.pattern(),
                        cycle_secs: t.cycle_secs(),
                        default_cycles: t.default_cycles,
                        max_cycles: t.max_cycles,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for t in &catalog {
                    println!(
                        "{} {:<17} {:<24} {:<10} {:>4.0}s/cycle  default {}x, max {}x",
                        t.icon,
                        t.id,
                        t.name,
                        t.pattern(),
                        t.cycle_secs(),
                        t.default_cycles,
                        t.max_cycles,
                    );
                }
            }
        }
        TechniqueAction::Show { id, json } => {
            let technique = Catalog::get(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&technique)?);
                return Ok(());
            }

            let config = Config::load_or_default();
            let loc = i18n::locale(&config.language);

            println!("{} {} ({})", technique.icon, technique.name, technique.pattern());
            println!("{}", technique.tagline);
            println!();
            println!("{}", loc.science);
            println!("  {}", technique.science);
            println!();
            println!("{}", loc.mechanism);
            println!("  {}", technique.mechanism);
            println!();
            println!("{}", loc.steps);
            for (i, step) in technique.steps.iter().enumerate() {
                println!("  {}. {step}", i + 1);
            }
            println!();
            println!(
                "{:.0}s/cycle, default {}x, max {}x",
                technique.cycle_secs(),
                technique.default_cycles,
                technique.max_cycles,
            );
        }
    }
    Ok(())
}
