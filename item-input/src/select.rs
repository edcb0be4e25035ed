//! Single selection from a fixed list.

use tracing::debug;

use crate::definition::InputDefinition;
use crate::menu::{Choice, MenuAction, choose, show_help};
use crate::{
    Context, InputResult, MAX_ITEM_VALUE_LENGTH, Outcome, Prompter, Summary, Value,
    clip_to_maximum, proceed,
};

/// How a selection value is shown in menus and summaries.
pub type DisplayFn = Box<dyn Fn(&Value) -> String>;

/// Lets the user pick one value out of a fixed list.
pub struct SelectDef {
    name: String,
    choices: Vec<(String, Value)>,
    display: Option<DisplayFn>,
    default: Option<Value>,
    help_text: Option<String>,
}

/// Pick one of `choices`, given as `(display name, value)` pairs.
///
/// The summary of a selected value is the display name of its choice.
pub fn select_def<I, N, V>(name: impl Into<String>, choices: I) -> SelectDef
where
    I: IntoIterator<Item = (N, V)>,
    N: Into<String>,
    V: Into<Value>,
{
    SelectDef {
        name: name.into(),
        choices: choices
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect(),
        display: None,
        default: None,
        help_text: None,
    }
}

/// Pick one of `items`, each shown (in the menu and in summaries) as `display` renders it.
pub fn list_selection_def<I, V>(
    name: impl Into<String>,
    items: I,
    display: impl Fn(&Value) -> String + 'static,
) -> SelectDef
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let choices = items
        .into_iter()
        .map(|item| {
            let item = item.into();
            (display(&item), item)
        })
        .collect();
    SelectDef {
        name: name.into(),
        choices,
        display: Some(Box::new(display)),
        default: None,
        help_text: None,
    }
}

impl SelectDef {
    /// Pre-select the choice holding `default` when building.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    fn ask(&self, current: Option<&Value>, prompter: &mut dyn Prompter) -> InputResult {
        let mut choices: Vec<Choice<MenuAction<usize>>> = self
            .choices
            .iter()
            .enumerate()
            .map(|(index, (label, _))| Choice::new(label.clone(), MenuAction::Select(index)))
            .collect();
        if self.help_text.is_some() {
            choices.push(Choice::help());
        }
        choices.push(Choice::cancel());

        let default = current
            .and_then(|current| self.choices.iter().position(|(_, value)| value == current))
            .map(MenuAction::Select);
        let message = format!("Select {}.", self.name);

        loop {
            match proceed!(choose(prompter, &message, &choices, default.as_ref())?) {
                MenuAction::Select(index) => {
                    if let Some((_, value)) = self.choices.get(index) {
                        return Ok(Outcome::Value(value.clone()));
                    }
                }
                MenuAction::Help => {
                    if let Some(help_text) = &self.help_text {
                        show_help(prompter, help_text);
                    }
                }
                MenuAction::Cancel => return Ok(Outcome::Cancelled),
                action @ (MenuAction::Add
                | MenuAction::Edit
                | MenuAction::Delete
                | MenuAction::Finish) => {
                    debug!(name = %self.name, ?action, "unexpected selection menu action");
                }
            }
        }
    }
}

impl InputDefinition for SelectDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, _context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        self.ask(self.default.as_ref(), prompter)
    }

    fn summarize(&self, value: &Value, _context: &Context<'_>) -> Summary {
        let text = match &self.display {
            Some(display) => display(value),
            None => self
                .choices
                .iter()
                .find(|(_, choice)| choice == value)
                .map_or_else(|| value.to_string(), |(label, _)| label.clone()),
        };
        Summary::Text(clip_to_maximum(&text, MAX_ITEM_VALUE_LENGTH))
    }

    fn update(
        &self,
        original: &Value,
        _context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        self.ask(Some(original), prompter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Answer, ScriptedPrompter};

    fn app_type() -> SelectDef {
        select_def(
            "App Type",
            [("Webhook SmartApp", "WEBHOOK_SMART_APP"), ("API Only", "API_ONLY")],
        )
    }

    #[test]
    fn selects_value_of_choice() {
        let mut prompter = ScriptedPrompter::new([Answer::select("API Only")]);

        let outcome = app_type().build(&Context::root(), &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("API_ONLY")));
        assert_eq!(
            prompter.last_menu().unwrap().items,
            ["Webhook SmartApp", "API Only", "Cancel"]
        );
        assert_eq!(prompter.asked(), ["Select App Type."]);
    }

    #[test]
    fn help_then_select() {
        let def = app_type().help_text("How the app is hosted.");
        let mut prompter =
            ScriptedPrompter::new([Answer::select("Help"), Answer::select("Webhook SmartApp")]);

        let outcome = def.build(&Context::root(), &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("WEBHOOK_SMART_APP")));
        assert_eq!(prompter.printed(), ["\nHow the app is hosted.\n"]);
    }

    #[test]
    fn cancel_entry_cancels() {
        let mut prompter = ScriptedPrompter::new([Answer::select("Cancel")]);

        let outcome = app_type().build(&Context::root(), &mut prompter).unwrap();

        assert!(outcome.is_cancelled());
    }

    #[test]
    fn update_preselects_original() {
        let mut prompter = ScriptedPrompter::new([Answer::Default]);

        let outcome = app_type()
            .update(&Value::from("API_ONLY"), &Context::root(), &mut prompter)
            .unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("API_ONLY")));
    }

    #[test]
    fn summary_is_display_name() {
        let def = app_type();

        assert_eq!(
            def.summarize(&Value::from("API_ONLY"), &Context::root()),
            Summary::text("API Only")
        );
    }

    #[test]
    fn list_selection_uses_display() {
        let rooms: Vec<Value> = vec![
            [("id", "r1"), ("name", "Kitchen")].into_iter().collect(),
            [("id", "r2"), ("name", "Garage")].into_iter().collect(),
        ];
        let def = list_selection_def("Room", rooms.clone(), |room| room.field("name").to_string());
        let mut prompter = ScriptedPrompter::new([Answer::select("Garage")]);

        let outcome = def.build(&Context::root(), &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(rooms[1].clone()));
        assert_eq!(def.summarize(&rooms[1], &Context::root()), Summary::text("Garage"));
    }
}
