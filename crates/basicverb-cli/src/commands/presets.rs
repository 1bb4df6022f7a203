//! Factory preset listing.

use basicverb_plugin::{factory_preset, factory_presets};
use clap::Args;

#[derive(Args)]
pub struct PresetsArgs {
    /// Show the parameter values of one preset
    name: Option<String>,
}

pub fn run(args: &PresetsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.name {
        let Some(preset) = factory_preset(name) else {
            anyhow::bail!("Unknown preset '{name}'. Run `basicverb presets` to list them");
        };
        println!("{}", preset.name);
        if let Some(desc) = &preset.description {
            println!("  {desc}");
        }
        println!();
        for (id, value) in &preset.params {
            println!("  {id:<10} = {value:.2}");
        }
        return Ok(());
    }

    println!("Factory Presets:\n");
    for preset in factory_presets() {
        println!(
            "  {:<12} {}",
            preset.name,
            preset.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
