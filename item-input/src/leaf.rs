//! Definitions that ask exactly one question (or none at all).

use std::fmt::Display;

use crate::definition::{ContextValidator, DefaultValue, FieldChange, InputDefinition};
use crate::menu::show_help;
use crate::{Context, InputResult, Outcome, Prompter, Summary, Value, proceed};

/// Validation callback for text answers: sees the answer and the build context.
pub type TextCheck = Box<dyn Fn(&str, &Context<'_>) -> Result<(), String>>;

const REQUIRED: &str = "value is required";

/// A string, asked for with a single text question.
///
/// Created with [`string_def`] (an answer is required) or [`optional_string_def`]
/// (a blank answer leaves the value undefined).
pub struct StringDef {
    name: String,
    required: bool,
    default: Option<DefaultValue<String>>,
    validate: Option<TextCheck>,
    help_text: Option<String>,
}

/// A required string.
pub fn string_def(name: impl Into<String>) -> StringDef {
    StringDef {
        name: name.into(),
        required: true,
        default: None,
        validate: None,
        help_text: None,
    }
}

/// A string the user may leave blank, yielding `Value::Null`.
pub fn optional_string_def(name: impl Into<String>) -> StringDef {
    StringDef {
        required: false,
        ..string_def(name)
    }
}

impl StringDef {
    /// Default offered when building.
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Fixed(default.into()));
        self
    }

    /// Default offered when building, derived from what was entered so far.
    pub fn default_with(
        mut self,
        compute: impl Fn(&Context<'_>) -> Option<String> + 'static,
    ) -> Self {
        self.default = Some(DefaultValue::Computed(Box::new(compute)));
        self
    }

    /// Reject answers for which `validate` returns an error message.
    ///
    /// Blank answers to an optional string are never passed to `validate`.
    pub fn validate(
        mut self,
        validate: impl Fn(&str, &Context<'_>) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Help text, printed when the user answers `?`.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    fn ask(
        &self,
        default: Option<&str>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let base = if self.required {
            self.name.clone()
        } else {
            format!("{} (optional)", self.name)
        };
        let message = match &self.help_text {
            Some(_) => format!("{base} (? for help)"),
            None => base,
        };
        let check = |input: &str| {
            if self.help_text.is_some() && input == "?" {
                return Ok(());
            }
            if input.is_empty() {
                return if self.required {
                    Err(REQUIRED.to_string())
                } else {
                    Ok(())
                };
            }
            match &self.validate {
                Some(validate) => validate(input, context),
                None => Ok(()),
            }
        };

        loop {
            let answer = proceed!(prompter.text(&message, default, &check)?);
            match &self.help_text {
                Some(help_text) if answer == "?" => show_help(prompter, help_text),
                _ if answer.is_empty() => return Ok(Outcome::Value(Value::Null)),
                _ => return Ok(Outcome::Value(Value::String(answer))),
            }
        }
    }
}

impl InputDefinition for StringDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        let default = self
            .default
            .as_ref()
            .and_then(|default| default.resolve(context));
        self.ask(default.as_deref(), context, prompter)
    }

    fn summarize(&self, value: &Value, _context: &Context<'_>) -> Summary {
        Summary::Text(value.to_string())
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        self.ask(original.as_str(), context, prompter)
    }
}

fn check_bounds<T: PartialOrd + Display>(
    value: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), String> {
    if let Some(min) = min
        && value < min
    {
        return Err(format!("must be no less than {min}"));
    }
    if let Some(max) = max
        && value > max
    {
        return Err(format!("must be no more than {max}"));
    }
    Ok(())
}

/// Message for a numeric question.
fn numeric_message(name: &str, required: bool) -> String {
    if required {
        name.to_string()
    } else {
        format!("{name} (optional)")
    }
}

/// An integer, optionally bounded.
pub struct IntegerDef {
    name: String,
    required: bool,
    min: Option<i64>,
    max: Option<i64>,
    default: Option<DefaultValue<i64>>,
    validate: Option<ContextValidator<i64>>,
}

/// A required integer.
pub fn integer_def(name: impl Into<String>) -> IntegerDef {
    IntegerDef {
        name: name.into(),
        required: true,
        min: None,
        max: None,
        default: None,
        validate: None,
    }
}

/// An integer the user may leave blank, yielding `Value::Null`.
pub fn optional_integer_def(name: impl Into<String>) -> IntegerDef {
    IntegerDef {
        required: false,
        ..integer_def(name)
    }
}

impl IntegerDef {
    pub fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn default_value(mut self, default: i64) -> Self {
        self.default = Some(DefaultValue::Fixed(default));
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&i64, &Context<'_>) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    fn ask(
        &self,
        default: Option<i64>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let check = |answer: Option<i64>| match answer {
            None if self.required => Err(REQUIRED.to_string()),
            None => Ok(()),
            Some(value) => {
                check_bounds(value, self.min, self.max)?;
                match &self.validate {
                    Some(validate) => validate(&value, context),
                    None => Ok(()),
                }
            }
        };
        let message = numeric_message(&self.name, self.required);
        let answer = proceed!(prompter.integer(&message, default, &check)?);
        Ok(Outcome::Value(answer.map_or(Value::Null, Value::Int)))
    }
}

impl InputDefinition for IntegerDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        let default = self
            .default
            .as_ref()
            .and_then(|default| default.resolve(context));
        self.ask(default, context, prompter)
    }

    fn summarize(&self, value: &Value, _context: &Context<'_>) -> Summary {
        Summary::Text(value.to_string())
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        self.ask(original.as_int(), context, prompter)
    }
}

/// A floating-point number, optionally bounded.
pub struct NumberDef {
    name: String,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    default: Option<DefaultValue<f64>>,
    validate: Option<ContextValidator<f64>>,
}

/// A required number.
pub fn number_def(name: impl Into<String>) -> NumberDef {
    NumberDef {
        name: name.into(),
        required: true,
        min: None,
        max: None,
        default: None,
        validate: None,
    }
}

/// A number the user may leave blank, yielding `Value::Null`.
pub fn optional_number_def(name: impl Into<String>) -> NumberDef {
    NumberDef {
        required: false,
        ..number_def(name)
    }
}

impl NumberDef {
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn default_value(mut self, default: f64) -> Self {
        self.default = Some(DefaultValue::Fixed(default));
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&f64, &Context<'_>) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    fn ask(
        &self,
        default: Option<f64>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let check = |answer: Option<f64>| match answer {
            None if self.required => Err(REQUIRED.to_string()),
            None => Ok(()),
            Some(value) => {
                check_bounds(value, self.min, self.max)?;
                match &self.validate {
                    Some(validate) => validate(&value, context),
                    None => Ok(()),
                }
            }
        };
        let message = numeric_message(&self.name, self.required);
        let answer = proceed!(prompter.number(&message, default, &check)?);
        Ok(Outcome::Value(answer.map_or(Value::Null, Value::Float)))
    }
}

impl InputDefinition for NumberDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        let default = self
            .default
            .as_ref()
            .and_then(|default| default.resolve(context));
        self.ask(default, context, prompter)
    }

    fn summarize(&self, value: &Value, _context: &Context<'_>) -> Summary {
        Summary::Text(value.to_string())
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        self.ask(original.as_float(), context, prompter)
    }
}

/// A yes/no answer.
pub struct BooleanDef {
    name: String,
    default: bool,
}

/// A yes/no question; hitting enter means yes unless changed with [`BooleanDef::default_value`].
pub fn boolean_def(name: impl Into<String>) -> BooleanDef {
    BooleanDef {
        name: name.into(),
        default: true,
    }
}

impl BooleanDef {
    pub fn default_value(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

impl InputDefinition for BooleanDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, _context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        let answer = proceed!(prompter.confirm(&self.name, self.default)?);
        Ok(Outcome::Value(Value::Bool(answer)))
    }

    fn summarize(&self, value: &Value, _context: &Context<'_>) -> Summary {
        match value.as_bool() {
            Some(true) => Summary::text("Yes"),
            _ => Summary::text("No"),
        }
    }

    fn update(
        &self,
        original: &Value,
        _context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let default = original.as_bool().unwrap_or(self.default);
        let answer = proceed!(prompter.confirm(&self.name, default)?);
        Ok(Outcome::Value(Value::Bool(answer)))
    }
}

/// A hard-coded value. The user is never asked or shown anything.
#[derive(Debug, Clone)]
pub struct StaticDef {
    value: Value,
}

pub fn static_def(value: impl Into<Value>) -> StaticDef {
    StaticDef {
        value: value.into(),
    }
}

/// A field that is always left undefined.
pub fn undefined_def() -> StaticDef {
    static_def(Value::Null)
}

impl InputDefinition for StaticDef {
    fn name(&self) -> &str {
        "static"
    }

    fn build(&self, _context: &Context<'_>, _prompter: &mut dyn Prompter) -> InputResult {
        Ok(Outcome::Value(self.value.clone()))
    }

    fn summarize(&self, _value: &Value, _context: &Context<'_>) -> Summary {
        Summary::Uneditable
    }

    fn update(
        &self,
        _original: &Value,
        _context: &Context<'_>,
        _prompter: &mut dyn Prompter,
    ) -> InputResult {
        Ok(Outcome::Value(self.value.clone()))
    }

    fn is_editable(&self) -> bool {
        false
    }
}

/// A value derived from what has been entered so far. Never asks anything.
pub struct ComputedDef {
    compute: Box<dyn Fn(&Context<'_>) -> Value>,
}

pub fn computed_def(compute: impl Fn(&Context<'_>) -> Value + 'static) -> ComputedDef {
    ComputedDef {
        compute: Box::new(compute),
    }
}

impl InputDefinition for ComputedDef {
    fn name(&self) -> &str {
        "computed"
    }

    fn build(&self, context: &Context<'_>, _prompter: &mut dyn Prompter) -> InputResult {
        Ok(Outcome::Value((self.compute)(context)))
    }

    fn summarize(&self, _value: &Value, _context: &Context<'_>) -> Summary {
        Summary::Uneditable
    }

    fn update(
        &self,
        _original: &Value,
        context: &Context<'_>,
        _prompter: &mut dyn Prompter,
    ) -> InputResult {
        Ok(Outcome::Value((self.compute)(context)))
    }

    fn update_if_needed(
        &self,
        _original: &Value,
        _change: &FieldChange<'_>,
        context: &Context<'_>,
        _prompter: &mut dyn Prompter,
    ) -> InputResult {
        Ok(Outcome::Value((self.compute)(context)))
    }

    fn is_editable(&self) -> bool {
        false
    }
}
