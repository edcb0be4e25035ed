//! Records: an ordered set of named fields, each with its own definition.

use tracing::{debug, trace};

use crate::definition::{BoxedDefinition, ContextValidator, FieldChange, InputDefinition};
use crate::menu::{Choice, MenuAction, choose, show_help};
use crate::{
    Context, InputError, InputResult, LoopExit, MAX_ITEM_VALUE_LENGTH, Outcome, Prompter,
    Summary, Value, clip_to_maximum,
};

/// Nested records with at most this many editable fields roll up by default.
pub const MAX_FIELDS_FOR_DEFAULT_ROLLUP: usize = 3;

/// Whether a nested record's fields are listed in its parent's edit menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rollup {
    /// Roll up when the record has few enough editable fields.
    #[default]
    Auto,

    /// Always list the fields in the parent's menu.
    Always,

    /// Always edit the record through its own menu.
    Never,
}

/// Custom summary of a whole record or list.
pub type SummaryFn = Box<dyn Fn(&Value, &Context<'_>) -> String>;

/// How a field is edited from its record's menu, decided when the field is added.
enum FieldDef {
    /// A nested record whose fields show up directly in the parent menu.
    RolledUp(ObjectDef),

    /// Any other definition, edited through its own update.
    Nested(BoxedDefinition),
}

impl FieldDef {
    fn definition(&self) -> &dyn InputDefinition {
        match self {
            Self::RolledUp(def) => def,
            Self::Nested(def) => &**def,
        }
    }
}

struct Field {
    key: String,
    def: FieldDef,
}

/// Menu entry payload: which field an `Edit` entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldRef {
    Field(usize),
    RolledUp { field: usize, nested: usize },
}

/// A record built field by field in declaration order, and edited through a
/// menu listing one entry per editable field.
///
/// Editing a field triggers [`InputDefinition::update_if_needed`] on every
/// field declared after it, so dependent fields can react.
pub struct ObjectDef {
    name: String,
    fields: Vec<Field>,
    rollup: Rollup,
    help_text: Option<String>,
    summarize_with: Option<SummaryFn>,
    validate_final: Option<ContextValidator<Value>>,
}

/// Start declaring a record called `name`; add fields with [`ObjectDef::field`].
///
/// ```rust
/// use item_input::{object_def, optional_integer_def, string_def};
///
/// let pref = object_def("Pref")
///     .field("name", string_def("Name"))
///     .field("age", optional_integer_def("Age"));
/// ```
pub fn object_def(name: impl Into<String>) -> ObjectDef {
    ObjectDef {
        name: name.into(),
        fields: Vec::new(),
        rollup: Rollup::Auto,
        help_text: None,
        summarize_with: None,
        validate_final: None,
    }
}

fn set_field(record: &mut Value, key: &str, value: Value) {
    if let Value::Object(fields) = record {
        fields.insert(key.to_string(), value);
    } else {
        *record = [(key, value)].into_iter().collect();
    }
}

fn as_record(value: &Value) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        _ => Value::object(),
    }
}

impl ObjectDef {
    /// Add a field. Fields are asked for in the order they are added.
    pub fn field(mut self, key: impl Into<String>, def: impl InputDefinition + 'static) -> Self {
        self.fields.push(Field {
            key: key.into(),
            def: FieldDef::Nested(Box::new(def)),
        });
        self
    }

    /// Add a nested record field, rolled up into this record's menu according
    /// to the nested record's [`Rollup`] setting.
    pub fn object(mut self, key: impl Into<String>, def: ObjectDef) -> Self {
        let def = if def.rolls_up() {
            FieldDef::RolledUp(def)
        } else {
            FieldDef::Nested(Box::new(def))
        };
        self.fields.push(Field {
            key: key.into(),
            def,
        });
        self
    }

    /// Decide how this record is edited when nested in another. Must be set
    /// before the record is added to its parent.
    pub fn rollup(mut self, rollup: Rollup) -> Self {
        self.rollup = rollup;
        self
    }

    /// Help text, printed before building and offered in the edit menu.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Summary shown when this record is a field of another record or an item of a list.
    pub fn summarize_with(
        mut self,
        summarize: impl Fn(&Value, &Context<'_>) -> String + 'static,
    ) -> Self {
        self.summarize_with = Some(Box::new(summarize));
        self
    }

    /// Check the completed record as a whole.
    pub fn validate_final_with(
        mut self,
        validate: impl Fn(&Value, &Context<'_>) -> Result<(), String> + 'static,
    ) -> Self {
        self.validate_final = Some(Box::new(validate));
        self
    }

    /// Number of fields that can show up in an edit menu.
    pub fn editable_field_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.def.definition().is_editable())
            .count()
    }

    /// Whether this record's fields are listed in its parent's menu.
    pub fn rolls_up(&self) -> bool {
        match self.rollup {
            Rollup::Always => true,
            Rollup::Never => false,
            Rollup::Auto => self.editable_field_count() <= MAX_FIELDS_FOR_DEFAULT_ROLLUP,
        }
    }

    /// Whether field `key` is a rolled-up nested record; `None` if there is no such field.
    pub fn is_rolled_up(&self, key: &str) -> Option<bool> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| matches!(field.def, FieldDef::RolledUp(_)))
    }

    fn menu_choices(
        &self,
        record: &Value,
        context: &Context<'_>,
    ) -> Vec<Choice<MenuAction<FieldRef>>> {
        let scope = context.push(self.name.as_str(), record.clone());
        let mut choices = Vec::new();
        for (index, field) in self.fields.iter().enumerate() {
            let value = record.field(&field.key);
            match &field.def {
                FieldDef::RolledUp(child) => {
                    let child_scope = scope.push(child.name.as_str(), value.clone());
                    for (nested, grandchild) in child.fields.iter().enumerate() {
                        let def = grandchild.def.definition();
                        if let Summary::Text(summary) =
                            def.summarize(value.field(&grandchild.key), &child_scope)
                        {
                            choices.push(Choice::new(
                                format!("Edit {}: {summary}", def.name()),
                                MenuAction::Select(FieldRef::RolledUp {
                                    field: index,
                                    nested,
                                }),
                            ));
                        }
                    }
                }
                FieldDef::Nested(def) => {
                    if let Summary::Text(summary) = def.summarize(value, &scope) {
                        choices.push(Choice::new(
                            format!("Edit {}: {summary}", def.name()),
                            MenuAction::Select(FieldRef::Field(index)),
                        ));
                    }
                }
            }
        }
        if self.help_text.is_some() {
            choices.push(Choice::help());
        }
        choices.push(Choice::finish(&self.name));
        choices.push(Choice::cancel());
        choices
    }

    fn edit_loop(
        &self,
        record: &mut Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<LoopExit, InputError> {
        loop {
            let choices = self.menu_choices(record, context);
            let action = match choose(prompter, &self.name, &choices, Some(&MenuAction::Finish))? {
                Outcome::Value(action) => action,
                Outcome::Cancelled => return Ok(LoopExit::Cancel),
            };
            trace!(name = %self.name, ?action, "menu action");
            match action {
                MenuAction::Select(FieldRef::Field(index)) => {
                    self.edit_field(index, record, context, prompter)?;
                }
                MenuAction::Select(FieldRef::RolledUp { field, nested }) => {
                    self.edit_rolled_up_field(field, nested, record, context, prompter)?;
                }
                MenuAction::Help => {
                    if let Some(help_text) = &self.help_text {
                        show_help(prompter, help_text);
                    }
                }
                MenuAction::Finish => return Ok(LoopExit::Finish),
                MenuAction::Cancel => return Ok(LoopExit::Cancel),
                MenuAction::Add | MenuAction::Edit | MenuAction::Delete => {
                    debug!(name = %self.name, ?action, "unexpected record menu action");
                }
            }
        }
    }

    fn edit_field(
        &self,
        index: usize,
        record: &mut Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<(), InputError> {
        let Some(field) = self.fields.get(index) else {
            return Ok(());
        };
        let original = record.field(&field.key).clone();
        let scope = context.push(self.name.as_str(), record.clone());
        let updated = match field.def.definition().update(&original, &scope, prompter)? {
            Outcome::Value(updated) => updated,
            Outcome::Cancelled => {
                debug!(name = %self.name, field = %field.key, "field edit cancelled");
                return Ok(());
            }
        };
        if updated == original {
            return Ok(());
        }

        let previous = record.clone();
        set_field(record, &field.key, updated);
        self.update_later_fields(index, &field.key, &previous, record, context, prompter)
    }

    fn edit_rolled_up_field(
        &self,
        index: usize,
        nested: usize,
        record: &mut Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<(), InputError> {
        let Some(field) = self.fields.get(index) else {
            return Ok(());
        };
        let FieldDef::RolledUp(child) = &field.def else {
            return Ok(());
        };
        let Some(grandchild) = child.fields.get(nested) else {
            return Ok(());
        };

        let mut child_record = as_record(record.field(&field.key));
        let original = child_record.field(&grandchild.key).clone();
        let scope = context.push(self.name.as_str(), record.clone());
        let child_scope = scope.push(child.name.as_str(), child_record.clone());
        let updated = match grandchild
            .def
            .definition()
            .update(&original, &child_scope, prompter)?
        {
            Outcome::Value(updated) => updated,
            Outcome::Cancelled => {
                debug!(
                    name = %self.name,
                    field = %field.key,
                    nested = %grandchild.key,
                    "field edit cancelled"
                );
                return Ok(());
            }
        };
        if updated == original {
            return Ok(());
        }

        let previous = record.clone();
        set_field(&mut child_record, &grandchild.key, updated);
        set_field(record, &field.key, child_record);
        // Only fields of this record are revisited, not later fields of the nested one.
        let changed = format!("{}.{}", field.key, grandchild.key);
        self.update_later_fields(index, &changed, &previous, record, context, prompter)
    }

    /// Run `update_if_needed` on every field declared after `index`, in order.
    fn update_later_fields(
        &self,
        index: usize,
        changed: &str,
        previous: &Value,
        record: &mut Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> Result<(), InputError> {
        let change = FieldChange {
            field: changed,
            previous,
        };
        for field in self.fields.iter().skip(index + 1) {
            trace!(name = %self.name, field = %field.key, changed, "update if needed");
            let original = record.field(&field.key).clone();
            let scope = context.push(self.name.as_str(), record.clone());
            let outcome = field
                .def
                .definition()
                .update_if_needed(&original, &change, &scope, prompter)?;
            if let Outcome::Value(updated) = outcome {
                set_field(record, &field.key, updated);
            }
        }
        Ok(())
    }
}

impl InputDefinition for ObjectDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        if let Some(help_text) = &self.help_text {
            show_help(prompter, help_text);
        }
        let mut record = Value::object();
        for field in &self.fields {
            let scope = context.push(self.name.as_str(), record.clone());
            match field.def.definition().build(&scope, prompter)? {
                Outcome::Value(value) => set_field(&mut record, &field.key, value),
                Outcome::Cancelled => {
                    debug!(name = %self.name, field = %field.key, "build cancelled");
                    return Ok(Outcome::Cancelled);
                }
            }
        }
        Ok(Outcome::Value(record))
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        if let Some(summarize) = &self.summarize_with {
            return Summary::Text(summarize(value, context));
        }
        let scope = context.push(self.name.as_str(), value.clone());
        let parts: Vec<String> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .def
                    .definition()
                    .summarize(value.field(&field.key), &scope)
                    .as_text()
                    .filter(|summary| !summary.is_empty())
                    .map(|summary| format!("{}: {summary}", field.key))
            })
            .collect();
        Summary::Text(clip_to_maximum(&parts.join(", "), MAX_ITEM_VALUE_LENGTH))
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let mut working = as_record(original);
        match self.edit_loop(&mut working, context, prompter)? {
            LoopExit::Finish => Ok(Outcome::Value(working)),
            LoopExit::Cancel => {
                debug!(name = %self.name, "edit cancelled");
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn is_editable(&self) -> bool {
        self.editable_field_count() > 0
    }

    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        let scope = context.push(self.name.as_str(), value.clone());
        for field in &self.fields {
            field
                .def
                .definition()
                .validate_final(value.field(&field.key), &scope)?;
        }
        match &self.validate_final {
            Some(validate) => validate(value, context),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Answer, ScriptedPrompter, boolean_def, static_def, string_def};

    fn address(fields: usize) -> ObjectDef {
        (0..fields).fold(object_def("Address"), |def, index| {
            def.field(format!("line{index}"), string_def(format!("Line {index}")))
        })
    }

    #[test]
    fn three_fields_roll_up_by_default() {
        let def = object_def("Person").object("address", address(3));

        assert_eq!(def.is_rolled_up("address"), Some(true));
    }

    #[test]
    fn four_fields_nest_by_default() {
        let def = object_def("Person").object("address", address(4));

        assert_eq!(def.is_rolled_up("address"), Some(false));
    }

    #[test]
    fn rollup_can_be_forced() {
        let def = object_def("Person")
            .object("small", address(2).rollup(Rollup::Never))
            .object("large", address(5).rollup(Rollup::Always));

        assert_eq!(def.is_rolled_up("small"), Some(false));
        assert_eq!(def.is_rolled_up("large"), Some(true));
        assert_eq!(def.is_rolled_up("missing"), None);
    }

    #[test]
    fn uneditable_fields_do_not_count_towards_rollup() {
        let nested = address(3).field("kind", static_def("HOME"));

        assert_eq!(nested.editable_field_count(), 3);
        assert!(nested.rolls_up());
    }

    #[test]
    fn menu_lists_editable_fields_then_finish_and_cancel() {
        let def = object_def("Device")
            .field("kind", static_def("DEVICE"))
            .field("label", string_def("Label"))
            .field("enabled", boolean_def("Enabled"));
        let original: Value = [
            ("kind", Value::from("DEVICE")),
            ("label", Value::from("Lamp")),
            ("enabled", Value::Bool(true)),
        ]
        .into_iter()
        .collect();
        let mut prompter = ScriptedPrompter::new([Answer::select("Finish editing Device.")]);

        let outcome = def.update(&original, &Context::root(), &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(original));
        let menu = prompter.last_menu().unwrap();
        assert_eq!(menu.message, "Device");
        assert_eq!(
            menu.items,
            [
                "Edit Label: Lamp",
                "Edit Enabled: Yes",
                "Finish editing Device.",
                "Cancel"
            ]
        );
    }

    #[test]
    fn rolled_up_fields_are_listed_individually() {
        let def = object_def("Person")
            .field("name", string_def("Name"))
            .object(
                "address",
                object_def("Address")
                    .field("city", string_def("City"))
                    .field("zip", string_def("Zip")),
            );
        let original: Value = [
            ("name", Value::from("Bob")),
            (
                "address",
                [("city", "Oslo"), ("zip", "0150")].into_iter().collect(),
            ),
        ]
        .into_iter()
        .collect();
        let mut prompter = ScriptedPrompter::new([
            Answer::select("Edit City: Oslo"),
            Answer::text("Bergen"),
            Answer::select("Finish editing Person."),
        ]);

        let outcome = def.update(&original, &Context::root(), &mut prompter).unwrap();

        let updated = outcome.value().unwrap();
        assert_eq!(updated.field("address").field("city"), &Value::from("Bergen"));
        assert_eq!(updated.field("address").field("zip"), &Value::from("0150"));
        assert_eq!(
            prompter.menus()[0].items,
            [
                "Edit Name: Bob",
                "Edit City: Oslo",
                "Edit Zip: 0150",
                "Finish editing Person.",
                "Cancel"
            ]
        );
    }

    #[test]
    fn cancelled_update_discards_edits() {
        let def = object_def("Pref").field("name", string_def("Name"));
        let original: Value = [("name", "Bob")].into_iter().collect();
        let mut prompter = ScriptedPrompter::new([
            Answer::select("Edit Name: Bob"),
            Answer::text("Alice"),
            Answer::select("Cancel"),
        ]);

        let outcome = def.update(&original, &Context::root(), &mut prompter).unwrap();

        assert!(outcome.is_cancelled());
    }

    #[test]
    fn help_is_printed_before_building() {
        let def = object_def("Pref")
            .help_text("Preferences of a device.")
            .field("name", string_def("Name"));
        let mut prompter = ScriptedPrompter::new([Answer::text("Bob")]);

        def.build(&Context::root(), &mut prompter).unwrap();

        assert_eq!(prompter.printed(), ["\nPreferences of a device.\n"]);
    }

    #[test]
    fn default_summary_lists_fields() {
        let def = object_def("Address")
            .field("city", string_def("City"))
            .field("zip", string_def("Zip"));
        let value: Value = [("city", "Oslo"), ("zip", "0150")].into_iter().collect();

        assert_eq!(
            def.summarize(&value, &Context::root()),
            Summary::text("city: Oslo, zip: 0150")
        );
    }

    #[test]
    fn validate_final_checks_whole_record() {
        let def = object_def("Range")
            .field("low", crate::integer_def("Low"))
            .field("high", crate::integer_def("High"))
            .validate_final_with(|value, _| {
                if value.field("low").as_int() <= value.field("high").as_int() {
                    Ok(())
                } else {
                    Err("low must not exceed high".to_string())
                }
            });
        let good: Value = [("low", 1), ("high", 2)].into_iter().collect();
        let bad: Value = [("low", 3), ("high", 2)].into_iter().collect();

        assert_eq!(def.validate_final(&good, &Context::root()), Ok(()));
        assert_eq!(
            def.validate_final(&bad, &Context::root()),
            Err("low must not exceed high".to_string())
        );
    }
}
