//! Parameter listing.

use basicverb_core::ParamKind;
use basicverb_plugin::{ReverbMainThread, ReverbShared};
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    /// Include numeric host ids
    #[arg(long)]
    ids: bool,
}

pub fn run(args: &ParamsArgs) -> anyhow::Result<()> {
    let shared = ReverbShared::new(None)?;
    let main_thread = ReverbMainThread::new(&shared);

    println!("Parameters:\n");
    if args.ids {
        print!("  {:<6}", "ID");
    }
    println!(
        "  {:<10} {:<12} {:<11} {:<12} {}",
        "KEY", "NAME", "KIND", "RANGE", "DEFAULT"
    );

    for index in 0..main_thread.param_count() {
        let Some(info) = main_thread.param_info(index) else {
            continue;
        };
        let range = match info.kind {
            ParamKind::Continuous => format!("{:.2}..{:.2}", info.min_value, info.max_value),
            ParamKind::Boolean => "off/on".to_string(),
        };
        if args.ids {
            print!("  {:<6}", info.id.0);
        }
        println!(
            "  {:<10} {:<12} {:<11} {:<12} {}",
            info.string_id,
            info.name,
            info.kind.as_str(),
            range,
            main_thread.value_to_text(info.id, info.default_value)
        );
    }
    Ok(())
}
