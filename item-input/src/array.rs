//! Lists of items sharing one item definition, edited through an add/edit/delete menu.

use tracing::debug;

use crate::definition::InputDefinition;
use crate::menu::{Choice, MenuAction, choose, show_help};
use crate::object::SummaryFn;
use crate::{
    Context, InputError, InputResult, LoopExit, MAX_ITEM_VALUE_LENGTH, Outcome, Prompter,
    Summary, Value, clip_to_maximum,
};

const DUPLICATE_REJECTED: &str = "Duplicate values are not allowed.";

/// An ordered list of items, each built and edited with the same item definition.
pub struct ArrayDef<D> {
    name: String,
    item: D,
    min_items: usize,
    max_items: Option<usize>,
    allow_duplicates: bool,
    help_text: Option<String>,
    summarize_with: Option<SummaryFn>,
}

/// A list called `name` whose items are entered with `item`.
///
/// At least one item is required unless changed with [`ArrayDef::min_items`],
/// and duplicate items are rejected unless [`ArrayDef::allow_duplicates`] is set.
///
/// ```rust
/// use item_input::{array_def, string_def};
///
/// let tags = array_def("Tags", string_def("Tag")).max_items(5);
/// ```
pub fn array_def<D: InputDefinition>(name: impl Into<String>, item: D) -> ArrayDef<D> {
    ArrayDef {
        name: name.into(),
        item,
        min_items: 1,
        max_items: None,
        allow_duplicates: false,
        help_text: None,
        summarize_with: None,
    }
}

impl<D: InputDefinition> ArrayDef<D> {
    pub fn min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn allow_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Summary of the whole list, replacing the comma-separated item summaries.
    pub fn summarize_with(
        mut self,
        summarize: impl Fn(&Value, &Context<'_>) -> String + 'static,
    ) -> Self {
        self.summarize_with = Some(Box::new(summarize));
        self
    }

    fn item_summary(&self, item: &Value, context: &Context<'_>) -> Result<String, InputError> {
        match self.item.summarize(item, context) {
            Summary::Text(summary) => Ok(summary),
            Summary::Uneditable => Err(InputError::UneditableItem {
                name: self.name.clone(),
            }),
        }
    }

    fn can_add(&self, list: &[Value]) -> bool {
        self.max_items.is_none_or(|max| list.len() < max)
    }

    /// Whether `value` may be stored at `index` (`None` when adding).
    fn accepts(
        &self,
        list: &[Value],
        value: &Value,
        index: Option<usize>,
        prompter: &mut dyn Prompter,
    ) -> bool {
        if self.allow_duplicates {
            return true;
        }
        let duplicate = list
            .iter()
            .enumerate()
            .any(|(other, item)| Some(other) != index && item == value);
        if duplicate {
            debug!(name = %self.name, "duplicate rejected");
            prompter.print(DUPLICATE_REJECTED);
        }
        !duplicate
    }

    fn edit_list(
        &self,
        list: &mut Vec<Value>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<LoopExit, InputError> {
        if !self.item.is_editable() {
            return Err(InputError::UneditableItem {
                name: self.name.clone(),
            });
        }
        let message = format!("Add or edit {}.", self.name);
        loop {
            let scope = context.push(self.name.as_str(), Value::List(list.clone()));
            let mut choices = Vec::with_capacity(list.len() + 4);
            for (index, item) in list.iter().enumerate() {
                let summary = self.item_summary(item, &scope)?;
                choices.push(Choice::new(format!("Edit {summary}."), MenuAction::Select(index)));
            }
            if self.help_text.is_some() {
                choices.push(Choice::help());
            }
            if self.can_add(list) {
                choices.push(Choice::add(self.item.name()));
            }
            let can_finish = list.len() >= self.min_items;
            if can_finish {
                choices.push(Choice::finish(&self.name));
            }
            choices.push(Choice::cancel());

            let default = if can_finish {
                MenuAction::Finish
            } else {
                MenuAction::Add
            };
            let action = match choose(prompter, &message, &choices, Some(&default))? {
                Outcome::Value(action) => action,
                Outcome::Cancelled => return Ok(LoopExit::Cancel),
            };
            match action {
                MenuAction::Add => match self.item.build(&scope, prompter)? {
                    Outcome::Value(item) => {
                        if self.accepts(list, &item, None, prompter) {
                            list.push(item);
                        }
                    }
                    Outcome::Cancelled => debug!(name = %self.name, "add cancelled"),
                },
                MenuAction::Select(index) => self.edit_item(list, index, &scope, prompter)?,
                MenuAction::Help => {
                    if let Some(help_text) = &self.help_text {
                        show_help(prompter, help_text);
                    }
                }
                MenuAction::Finish => return Ok(LoopExit::Finish),
                MenuAction::Cancel => return Ok(LoopExit::Cancel),
                MenuAction::Edit | MenuAction::Delete => {
                    debug!(name = %self.name, ?action, "unexpected list menu action");
                }
            }
        }
    }

    fn edit_item(
        &self,
        list: &mut Vec<Value>,
        index: usize,
        scope: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<(), InputError> {
        let Some(current) = list.get(index).cloned() else {
            return Ok(());
        };
        let summary = self.item_summary(&current, scope)?;
        let mut choices = vec![Choice::edit(&summary)];
        if list.len() > self.min_items {
            choices.push(Choice::delete(&summary));
        }
        choices.push(Choice::cancel());

        let message = format!("What do you want to do with {summary}?");
        let chosen = choose(prompter, &message, &choices, Some(&MenuAction::<()>::Edit))?;
        let action = match chosen {
            Outcome::Value(action) => action,
            Outcome::Cancelled => return Ok(()),
        };
        match action {
            MenuAction::Edit => match self.item.update(&current, scope, prompter)? {
                Outcome::Value(item) => {
                    if self.accepts(list, &item, Some(index), prompter) {
                        list[index] = item;
                    }
                }
                Outcome::Cancelled => debug!(name = %self.name, index, "item edit cancelled"),
            },
            MenuAction::Delete => {
                list.remove(index);
            }
            MenuAction::Cancel => {}
            MenuAction::Select(()) | MenuAction::Add | MenuAction::Finish | MenuAction::Help => {
                debug!(name = %self.name, index, ?action, "unexpected item menu action");
            }
        }
        Ok(())
    }
}

impl<D: InputDefinition> InputDefinition for ArrayDef<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        let mut list = Vec::new();
        match self.edit_list(&mut list, context, prompter)? {
            LoopExit::Finish => Ok(Outcome::Value(Value::List(list))),
            LoopExit::Cancel => Ok(Outcome::Cancelled),
        }
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        if let Some(summarize) = &self.summarize_with {
            return Summary::Text(summarize(value, context));
        }
        let summaries: Vec<String> = value
            .as_list()
            .unwrap_or_default()
            .iter()
            .filter_map(|item| self.item.summarize(item, context).as_text().map(str::to_string))
            .collect();
        Summary::Text(clip_to_maximum(&summaries.join(", "), MAX_ITEM_VALUE_LENGTH))
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let mut list = original.as_list().unwrap_or_default().to_vec();
        match self.edit_list(&mut list, context, prompter)? {
            LoopExit::Finish => Ok(Outcome::Value(Value::List(list))),
            LoopExit::Cancel => {
                debug!(name = %self.name, "edit cancelled");
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        let scope = context.push(self.name.as_str(), value.clone());
        for item in value.as_list().unwrap_or_default() {
            self.item.validate_final(item, &scope)?;
        }
        Ok(())
    }
}
