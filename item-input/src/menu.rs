//! The menu vocabulary shared by record, list and selection definitions.

use crate::{Outcome, PromptError, Prompter, proceed};

/// What a menu entry does when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction<T> {
    /// An entry specific to the menu: a field, a list item, a preview...
    Select(T),

    /// Add a new item.
    Add,

    /// Edit the item the menu is about.
    Edit,

    /// Delete the item the menu is about.
    Delete,

    /// Done editing; keep the changes.
    Finish,

    /// Back out; discard the changes.
    Cancel,

    /// Show the help text.
    Help,
}

/// One entry of a menu: the label shown to the user and the action it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<A> {
    pub label: String,
    pub action: A,
}

impl<A> Choice<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

impl<T> Choice<MenuAction<T>> {
    pub fn add(name: &str) -> Self {
        Self::new(format!("Add {name}."), MenuAction::Add)
    }

    pub fn edit(name: &str) -> Self {
        Self::new(format!("Edit {name}."), MenuAction::Edit)
    }

    pub fn delete(name: &str) -> Self {
        Self::new(format!("Delete {name}."), MenuAction::Delete)
    }

    pub fn finish(name: &str) -> Self {
        Self::new(format!("Finish editing {name}."), MenuAction::Finish)
    }

    pub fn cancel() -> Self {
        Self::new("Cancel", MenuAction::Cancel)
    }

    pub fn help() -> Self {
        Self::new("Help", MenuAction::Help)
    }
}

/// Present `choices` and return the action of the chosen entry.
///
/// `default` pre-selects the first entry carrying that action, if offered.
/// Backing out of the menu itself is a cancellation.
pub fn choose<A: Clone + PartialEq>(
    prompter: &mut dyn Prompter,
    message: &str,
    choices: &[Choice<A>],
    default: Option<&A>,
) -> Result<Outcome<A>, PromptError> {
    let labels: Vec<String> = choices.iter().map(|choice| choice.label.clone()).collect();
    let default_index =
        default.and_then(|action| choices.iter().position(|choice| &choice.action == action));

    let index = proceed!(prompter.select(message, &labels, default_index)?);
    match choices.get(index) {
        Some(choice) => Ok(Outcome::Value(choice.action.clone())),
        None => Err(PromptError::InvalidSelection(index)),
    }
}

/// Print help text set off by blank lines.
pub fn show_help(prompter: &mut dyn Prompter, help_text: &str) {
    prompter.print(&format!("\n{help_text}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Answer, ScriptedPrompter};

    fn list_menu() -> Vec<Choice<MenuAction<usize>>> {
        vec![
            Choice::new("Edit x.", MenuAction::Select(0)),
            Choice::add("Tag"),
            Choice::finish("Tags"),
            Choice::cancel(),
        ]
    }

    #[test]
    fn choose_returns_the_action_of_the_chosen_label() {
        let mut prompter = ScriptedPrompter::new([
            Answer::select("Edit x."),
            Answer::select("Add Tag."),
            Answer::Default,
        ]);
        let choices = list_menu();

        let mut chosen = Vec::new();
        for _ in 0..3 {
            let outcome =
                choose(&mut prompter, "Add or edit Tags.", &choices, Some(&MenuAction::Finish));
            chosen.push(outcome.unwrap());
        }

        assert_eq!(
            chosen,
            [
                Outcome::Value(MenuAction::Select(0)),
                Outcome::Value(MenuAction::Add),
                Outcome::Value(MenuAction::Finish),
            ]
        );
    }

    #[test]
    fn backing_out_of_a_menu_is_a_cancellation() {
        let mut prompter = ScriptedPrompter::new([Answer::Cancel]);

        let outcome = choose(&mut prompter, "Add or edit Tags.", &list_menu(), None).unwrap();

        assert!(outcome.is_cancelled());
    }
}
