use crate::{Context, InputResult, Outcome, Prompter, Summary, Value};

/// Describes how to ask the user for one value and how to edit it later.
///
/// Definitions are stateless and reusable: the same definition serves create
/// flows ([`build`](Self::build)) and edit flows ([`update`](Self::update)).
/// All in-progress state lives in the call that is currently running.
///
/// Every operation returns [`Outcome::Cancelled`] if the user backs out, which
/// callers hand straight back up without asking anything else.
pub trait InputDefinition {
    /// Display name used in prompts and menus.
    fn name(&self) -> &str;

    /// Ask the user for everything needed to produce a new value.
    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult;

    /// A one-line summary of `value` for edit menus, or `Summary::Uneditable`
    /// to keep the value out of them.
    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary;

    /// Let the user edit `original`, returning the new value.
    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult;

    /// Called by an enclosing record on fields declared after a field that changed.
    ///
    /// Computed and conditional fields use this to react to earlier answers.
    /// The default keeps `original`.
    fn update_if_needed(
        &self,
        original: &Value,
        change: &FieldChange<'_>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let _ = (change, context, prompter);
        Ok(Outcome::Value(original.clone()))
    }

    /// Whether values of this definition can ever show up in an edit menu.
    ///
    /// Used when deciding whether a nested record is small enough to roll up.
    fn is_editable(&self) -> bool {
        true
    }

    /// Check a completed value as a whole. Runs once after the whole value is done.
    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        let _ = (value, context);
        Ok(())
    }
}

/// A boxed input definition, as stored in records and lists.
pub type BoxedDefinition = Box<dyn InputDefinition>;

impl<D: InputDefinition + ?Sized> InputDefinition for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        (**self).build(context, prompter)
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        (**self).summarize(value, context)
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        (**self).update(original, context, prompter)
    }

    fn update_if_needed(
        &self,
        original: &Value,
        change: &FieldChange<'_>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        (**self).update_if_needed(original, change, context, prompter)
    }

    fn is_editable(&self) -> bool {
        (**self).is_editable()
    }

    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        (**self).validate_final(value, context)
    }
}

/// Describes an edit that triggers [`InputDefinition::update_if_needed`] on later fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldChange<'a> {
    /// Key of the field that changed; `parent.child` for a rolled-up field.
    pub field: &'a str,

    /// The enclosing record as it was before the change.
    pub previous: &'a Value,
}

/// Validation callback of a definition: sees the candidate and the build context.
pub type ContextValidator<T> = Box<dyn Fn(&T, &Context<'_>) -> Result<(), String>>;

/// A default value, fixed or derived from the build context.
pub enum DefaultValue<T> {
    /// Always the same default.
    Fixed(T),

    /// Computed from what has been entered so far.
    Computed(Box<dyn Fn(&Context<'_>) -> Option<T>>),
}

impl<T: Clone> DefaultValue<T> {
    /// Resolve the default against `context`.
    pub fn resolve(&self, context: &Context<'_>) -> Option<T> {
        match self {
            Self::Fixed(value) => Some(value.clone()),
            Self::Computed(compute) => compute(context),
        }
    }
}

impl<T> std::fmt::Debug for DefaultValue<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
