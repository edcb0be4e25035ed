//! Multi-select from a fixed catalog.

use crate::definition::InputDefinition;
use crate::menu::show_help;
use crate::object::SummaryFn;
use crate::{
    Context, InputResult, MAX_ITEM_VALUE_LENGTH, Outcome, Prompter, Summary, Value,
    clip_to_maximum, proceed,
};

/// Validation of a whole checkbox selection.
pub type SelectionCheck = Box<dyn Fn(&[Value]) -> Result<(), String>>;

/// Lets the user check any subset of a fixed list of values with one question.
pub struct CheckboxDef {
    name: String,
    items: Vec<(String, Value)>,
    defaults: Vec<Value>,
    validate: Option<SelectionCheck>,
    help_text: Option<String>,
    summarize_with: Option<SummaryFn>,
}

/// Check any of `items`, given as `(display name, value)` pairs.
pub fn checkbox_def<I, N, V>(name: impl Into<String>, items: I) -> CheckboxDef
where
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<Value>,
{
    CheckboxDef {
        name: name.into(),
        items: items
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect(),
        defaults: Vec::new(),
        validate: None,
        help_text: None,
        summarize_with: None,
    }
}

/// Check any of the strings in `items`; each string is its own display name.
pub fn string_checkbox_def<I, S>(name: impl Into<String>, items: I) -> CheckboxDef
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    checkbox_def(
        name,
        items.into_iter().map(|item| {
            let item = item.into();
            (item.clone(), item)
        }),
    )
}

impl CheckboxDef {
    /// Values checked when building.
    pub fn defaults<I, V>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.defaults = defaults.into_iter().map(Into::into).collect();
        self
    }

    /// Reject selections for which `validate` returns an error message.
    pub fn validate(
        mut self,
        validate: impl Fn(&[Value]) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    /// Help text, printed before the question.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn summarize_with(
        mut self,
        summarize: impl Fn(&Value, &Context<'_>) -> String + 'static,
    ) -> Self {
        self.summarize_with = Some(Box::new(summarize));
        self
    }

    fn selected_values(&self, indices: &[usize]) -> Vec<Value> {
        indices
            .iter()
            .filter_map(|&index| self.items.get(index).map(|(_, value)| value.clone()))
            .collect()
    }

    fn edit_values(&self, values: &[Value], prompter: &mut dyn Prompter) -> InputResult {
        if let Some(help_text) = &self.help_text {
            show_help(prompter, help_text);
        }
        let labels: Vec<String> = self.items.iter().map(|(label, _)| label.clone()).collect();
        let checked: Vec<bool> = self
            .items
            .iter()
            .map(|(_, value)| values.contains(value))
            .collect();
        let check = |indices: &[usize]| match &self.validate {
            Some(validate) => validate(&self.selected_values(indices)),
            None => Ok(()),
        };

        let message = format!("Select {}.", self.name);
        let indices = proceed!(prompter.multi_select(&message, &labels, &checked, &check)?);
        Ok(Outcome::Value(Value::List(self.selected_values(&indices))))
    }
}

impl InputDefinition for CheckboxDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, _context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        self.edit_values(&self.defaults, prompter)
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        if let Some(summarize) = &self.summarize_with {
            return Summary::Text(summarize(value, context));
        }
        let labels: Vec<String> = value
            .as_list()
            .unwrap_or_default()
            .iter()
            .map(|selected| {
                self.items
                    .iter()
                    .find(|(_, value)| value == selected)
                    .map_or_else(|| selected.to_string(), |(label, _)| label.clone())
            })
            .collect();
        Summary::Text(clip_to_maximum(&labels.join(", "), MAX_ITEM_VALUE_LENGTH))
    }

    fn update(
        &self,
        original: &Value,
        _context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        self.edit_values(original.as_list().unwrap_or_default(), prompter)
    }
}
