//! Device preferences: a typed setting whose shape depends on its type.
//!
//! The `definition` field is asked with one of several records, picked by the
//! preference type chosen earlier. Changing the type asks for a new definition.

use item_input::{
    Context, FieldChange, InputDefinition, InputResult, ObjectDef, Outcome, Prompter, Summary,
    Value, array_def, boolean_def, object_def, optional_integer_def, optional_number_def,
    optional_string_def, select_def, string_def,
};
use tracing::debug;

pub const PREFERENCE_TYPES: [&str; 5] = ["integer", "number", "boolean", "string", "enumeration"];

/// `camelCase`, starting with a lowercase letter, 3 to 24 characters.
pub fn validate_preference_name(input: &str) -> Result<(), String> {
    let mut chars = input.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
        && (3..=24).contains(&input.len());
    if valid {
        Ok(())
    } else {
        Err("must be camelCase starting with a lowercase letter and 3-24 characters".to_string())
    }
}

fn int_field(context: &Context<'_>, key: &str) -> Option<i64> {
    context.field(key).and_then(Value::as_int)
}

fn float_field(context: &Context<'_>, key: &str) -> Option<f64> {
    context.field(key).and_then(Value::as_float)
}

fn integer_definition() -> ObjectDef {
    object_def("Integer Definition")
        .field("minimum", optional_integer_def("Minimum value"))
        .field(
            "maximum",
            optional_integer_def("Maximum value").validate(|max, context| {
                match int_field(context, "minimum") {
                    Some(min) if *max < min => Err(format!("must be no less than {min}")),
                    _ => Ok(()),
                }
            }),
        )
        .field(
            "default",
            optional_integer_def("Default value").validate(|value, context| {
                if let Some(min) = int_field(context, "minimum")
                    && *value < min
                {
                    return Err(format!("must be no less than {min}"));
                }
                match int_field(context, "maximum") {
                    Some(max) if *value > max => Err(format!("must be no more than {max}")),
                    _ => Ok(()),
                }
            }),
        )
}

fn number_definition() -> ObjectDef {
    object_def("Number Definition")
        .field("minimum", optional_number_def("Minimum value"))
        .field(
            "maximum",
            optional_number_def("Maximum value").validate(|max, context| {
                match float_field(context, "minimum") {
                    Some(min) if *max < min => Err(format!("must be no less than {min}")),
                    _ => Ok(()),
                }
            }),
        )
        .field(
            "default",
            optional_number_def("Default value").validate(|value, context| {
                if let Some(min) = float_field(context, "minimum")
                    && *value < min
                {
                    return Err(format!("must be no less than {min}"));
                }
                match float_field(context, "maximum") {
                    Some(max) if *value > max => Err(format!("must be no more than {max}")),
                    _ => Ok(()),
                }
            }),
        )
}

fn boolean_definition() -> ObjectDef {
    object_def("Boolean Definition").field(
        "default",
        select_def(
            "Default value",
            [
                ("none", Value::Null),
                ("true", Value::Bool(true)),
                ("false", Value::Bool(false)),
            ],
        )
        .default_value(Value::Null),
    )
}

fn string_definition() -> ObjectDef {
    object_def("String Definition")
        .field("minLength", optional_integer_def("Minimum length").min(0))
        .field(
            "maxLength",
            optional_integer_def("Maximum length").validate(|max, context| {
                match int_field(context, "minLength") {
                    Some(min) if *max < min => Err(format!("must be no less than {min}")),
                    _ => Ok(()),
                }
            }),
        )
        .field(
            "stringType",
            select_def(
                "String type",
                [("text", "text"), ("password", "password"), ("paragraph", "paragraph")],
            )
            .default_value("text"),
        )
        .field(
            "default",
            optional_string_def("Default value").validate(|input, context| {
                let length = input.chars().count() as i64;
                if let Some(min) = int_field(context, "minLength")
                    && length < min
                {
                    return Err(format!(
                        "default must be no less than minLength ({min}) characters"
                    ));
                }
                match int_field(context, "maxLength") {
                    Some(max) if length > max => Err(format!(
                        "default must be no more than maxLength ({max}) characters"
                    )),
                    _ => Ok(()),
                }
            }),
        )
}

fn enumeration_definition() -> ObjectDef {
    let option = object_def("Option")
        .field("name", string_def("Option name (key)"))
        .field("value", string_def("Option value"));
    object_def("Enumeration Definition")
        .field("options", array_def("Options", option))
        .field(
            "default",
            optional_string_def("Default option name").validate(|input, context| {
                let known = context
                    .field("options")
                    .and_then(Value::as_list)
                    .unwrap_or_default()
                    .iter()
                    .any(|option| option.field("name").as_str() == Some(input));
                if known {
                    Ok(())
                } else {
                    Err(format!("{input} is not one of the options"))
                }
            }),
        )
}

/// The type-dependent part of a preference.
pub struct PreferenceDefinition {
    by_type: Vec<(&'static str, ObjectDef)>,
}

impl Default for PreferenceDefinition {
    fn default() -> Self {
        Self {
            by_type: vec![
                ("integer", integer_definition()),
                ("number", number_definition()),
                ("boolean", boolean_definition()),
                ("string", string_definition()),
                ("enumeration", enumeration_definition()),
            ],
        }
    }
}

fn preference_type<'v>(record: &'v Value) -> Option<&'v str> {
    record.field("preferenceType").as_str()
}

impl PreferenceDefinition {
    fn for_type(&self, preference_type: Option<&str>) -> Option<&ObjectDef> {
        let preference_type = preference_type?;
        self.by_type
            .iter()
            .find(|(name, _)| *name == preference_type)
            .map(|(_, def)| def)
    }

    fn active(&self, context: &Context<'_>) -> Option<&ObjectDef> {
        self.for_type(context.field("preferenceType").and_then(Value::as_str))
    }
}

impl InputDefinition for PreferenceDefinition {
    fn name(&self) -> &str {
        "Definition"
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        match self.active(context) {
            Some(def) => def.build(context, prompter),
            None => Ok(Outcome::Value(Value::Null)),
        }
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        match self.active(context) {
            Some(def) => def.summarize(value, context),
            None => Summary::Uneditable,
        }
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        match self.active(context) {
            Some(def) => def.update(original, context, prompter),
            None => Ok(Outcome::Value(Value::Null)),
        }
    }

    fn update_if_needed(
        &self,
        original: &Value,
        change: &FieldChange<'_>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let previous = preference_type(change.previous);
        let current = context.field("preferenceType").and_then(Value::as_str);
        if previous == current {
            return Ok(Outcome::Value(original.clone()));
        }
        debug!(?previous, ?current, "preference type changed");
        self.build(context, prompter)
    }

    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        match self.active(context) {
            Some(def) => def.validate_final(value, context),
            None => Ok(()),
        }
    }
}

/// A device preference: name, title and a definition matching its type.
pub fn device_preference_def() -> ObjectDef {
    object_def("Device Preference")
        .field(
            "name",
            optional_string_def("Preference name")
                .validate(|input, _| validate_preference_name(input)),
        )
        .field("title", string_def("Preference title"))
        .field("description", optional_string_def("Preference description"))
        .field(
            "required",
            boolean_def("Is the preference required?").default_value(false),
        )
        .field(
            "preferenceType",
            select_def("Preference type", PREFERENCE_TYPES.map(|name| (name, name))),
        )
        .field("definition", PreferenceDefinition::default())
}
