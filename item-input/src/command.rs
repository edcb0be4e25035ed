//! Driver helpers for create and update commands.
//!
//! These run a root definition and then keep the user in a short review loop
//! (edit again, preview as JSON or YAML, finish, cancel) before handing the
//! value back. They never act on the value themselves.

use serde::Serialize;
use tracing::debug;

use crate::definition::InputDefinition;
use crate::menu::{Choice, MenuAction, choose};
use crate::{Context, InputError, InputResult, Outcome, Prompter, Value, proceed};

/// JSON indentation used for previews unless configured.
pub const DEFAULT_INDENT: usize = 4;

/// What finishing the review loop leads to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FinishVerb {
    #[default]
    Create,
    Update,
}

impl FinishVerb {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Create => "creation",
            Self::Update => "update",
        }
    }
}

/// Options of the driver helpers.
#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// The value will only be output, not sent anywhere.
    pub dry_run: bool,

    pub finish_verb: FinishVerb,

    /// JSON preview indentation; [`DEFAULT_INDENT`] when not set.
    pub indent: Option<usize>,
}

impl DriverOptions {
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    fn finish_label(&self, name: &str) -> String {
        let verb = if self.dry_run {
            "output"
        } else {
            self.finish_verb.verb()
        };
        format!("Finish and {verb} {name}.")
    }

    fn cancel_label(&self, name: &str) -> String {
        format!("Cancel {} of {name}.", self.finish_verb.noun())
    }
}

/// Preview formats offered by the review menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewFormat {
    Json,
    Yaml,
}

/// Render `value` for a preview.
pub fn render(value: &Value, format: PreviewFormat, indent: usize) -> Result<String, InputError> {
    match format {
        PreviewFormat::Json => {
            let indent = " ".repeat(indent);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            value
                .serialize(&mut serializer)
                .map_err(|err| InputError::Render(err.to_string()))?;
            String::from_utf8(out).map_err(|err| InputError::Render(err.to_string()))
        }
        PreviewFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|err| InputError::Render(err.to_string()))
        }
    }
}

/// Build a new value with `def`, then let the user review it.
///
/// Returns `Outcome::Cancelled` if the user backs out at any point.
pub fn create_from_user_input(
    def: &dyn InputDefinition,
    prompter: &mut dyn Prompter,
    options: &DriverOptions,
) -> InputResult {
    let value = match def.build(&Context::root(), prompter)? {
        Outcome::Value(value) => value,
        Outcome::Cancelled => {
            debug!(name = def.name(), "creation cancelled while building");
            return Ok(Outcome::Cancelled);
        }
    };
    let options = DriverOptions {
        finish_verb: FinishVerb::Create,
        ..options.clone()
    };
    update_from_user_input(def, &value, prompter, &options)
}

/// Let the user review and edit `previous` until they finish or cancel.
///
/// Final validation runs before every review menu; a rejected value is
/// reported and reopened for editing.
pub fn update_from_user_input(
    def: &dyn InputDefinition,
    previous: &Value,
    prompter: &mut dyn Prompter,
    options: &DriverOptions,
) -> InputResult {
    let context = Context::root();
    let name = def.name();
    let choices = [
        Choice::edit(name),
        Choice::new("Preview JSON.", MenuAction::Select(PreviewFormat::Json)),
        Choice::new("Preview YAML.", MenuAction::Select(PreviewFormat::Yaml)),
        Choice::new(options.finish_label(name), MenuAction::Finish),
        Choice::new(options.cancel_label(name), MenuAction::Cancel),
    ];

    let mut value = previous.clone();
    loop {
        while let Err(message) = def.validate_final(&value, &context) {
            debug!(name, %message, "final validation failed");
            prompter.print(&message);
            value = proceed!(def.update(&value, &context, prompter)?);
        }

        let chosen = choose(
            prompter,
            "Choose an action.",
            &choices,
            Some(&MenuAction::Finish),
        )?;
        let action = match chosen {
            Outcome::Value(action) => action,
            Outcome::Cancelled => MenuAction::Cancel,
        };
        match action {
            MenuAction::Edit => {
                if let Outcome::Value(updated) = def.update(&value, &context, prompter)? {
                    value = updated;
                }
            }
            MenuAction::Select(format) => {
                let indent = options.indent.unwrap_or(DEFAULT_INDENT);
                let output = render(&value, format, indent)?;
                let message = format!("{output}\n\nWould you like to edit further?");
                if proceed!(prompter.confirm(&message, false)?) {
                    if let Outcome::Value(updated) = def.update(&value, &context, prompter)? {
                        value = updated;
                    }
                }
            }
            MenuAction::Finish => return Ok(Outcome::Value(value)),
            MenuAction::Cancel => {
                debug!(name, "cancelled from review menu");
                return Ok(Outcome::Cancelled);
            }
            MenuAction::Add | MenuAction::Delete | MenuAction::Help => {
                debug!(name, ?action, "unexpected review menu action");
            }
        }
    }
}

/// [`create_from_user_input`] for callers that want a typed structure.
pub fn create_typed<T: serde::de::DeserializeOwned>(
    def: &dyn InputDefinition,
    prompter: &mut dyn Prompter,
    options: &DriverOptions,
) -> InputResult<T> {
    let value = proceed!(create_from_user_input(def, prompter, options)?);
    Ok(Outcome::Value(value.deserialize_into()?))
}

/// [`update_from_user_input`] starting from and returning a typed structure.
pub fn update_typed<T>(
    def: &dyn InputDefinition,
    previous: &T,
    prompter: &mut dyn Prompter,
    options: &DriverOptions,
) -> InputResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let previous = Value::from_serialize(previous)?;
    let value = proceed!(update_from_user_input(def, &previous, prompter, options)?);
    Ok(Outcome::Value(value.deserialize_into()?))
}
