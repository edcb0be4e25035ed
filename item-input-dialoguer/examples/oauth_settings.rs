//! Create an OAuth-in app, then edit its OAuth settings as a typed structure.
//! Run with: cargo run --example oauth_settings [-- --verbose]

use example_inputs::{OAuthSettings, oauth_app_def, oauth_settings_def};
use item_input::{DriverOptions, FinishVerb, Outcome, create_from_user_input, update_typed};
use item_input_dialoguer::DialoguerPrompter;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--verbose") {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut prompter = DialoguerPrompter::new();
    let created =
        create_from_user_input(&oauth_app_def(), &mut prompter, &DriverOptions::default())?;
    let app = match created {
        Outcome::Value(app) => app,
        Outcome::Cancelled => {
            println!("Cancelled.");
            return Ok(());
        }
    };
    println!("{}", serde_json::to_string_pretty(&app)?);

    let settings: OAuthSettings = app.field("oauth").deserialize_into()?;
    let options = DriverOptions {
        finish_verb: FinishVerb::Update,
        ..DriverOptions::default()
    };
    match update_typed(&oauth_settings_def(), &settings, &mut prompter, &options)? {
        Outcome::Value(updated) => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Outcome::Cancelled => println!("Update cancelled."),
    }
    Ok(())
}
