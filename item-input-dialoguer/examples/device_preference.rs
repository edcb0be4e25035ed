//! Create a device preference.
//!
//! Run with: `cargo run --example device_preference [-- --dry-run] [--verbose]`

use example_inputs::device_preference_def;
use item_input::{DriverOptions, Outcome, PreviewFormat, create_from_user_input, render};
use item_input_dialoguer::DialoguerPrompter;

fn main() -> anyhow::Result<()> {
    let verbose = std::env::args().any(|arg| arg == "--verbose");
    let dry_run = std::env::args().any(|arg| arg == "--dry-run");
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut prompter = DialoguerPrompter::new();
    let options = DriverOptions::default().dry_run(dry_run);
    match create_from_user_input(&device_preference_def(), &mut prompter, &options)? {
        Outcome::Value(preference) => {
            println!("{}", render(&preference, PreviewFormat::Yaml, 2)?);
        }
        Outcome::Cancelled => println!("Cancelled."),
    }
    Ok(())
}
