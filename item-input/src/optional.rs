//! Conditional fields.

use tracing::debug;

use crate::definition::{FieldChange, InputDefinition};
use crate::{Context, InputResult, Outcome, Prompter, Summary, Value};

/// Activation predicate of an [`OptionalDef`].
pub type ActivationPredicate = Box<dyn Fn(&Context<'_>) -> bool>;

/// Wraps an inner definition that is only asked while a predicate over the
/// build context holds. While inactive the value is `Value::Null` and nothing
/// is asked.
pub struct OptionalDef<D> {
    inner: D,
    is_active: ActivationPredicate,
}

/// Ask `inner` only when `is_active` returns true for the current context.
///
/// ```rust
/// use item_input::{Context, InputDefinition, Outcome, ScriptedPrompter, Value, optional_def, string_def};
///
/// let def = optional_def(string_def("Client secret"), |context| {
///     context.field("kind").and_then(Value::as_str) == Some("oauth")
/// });
/// let mut prompter = ScriptedPrompter::default();
///
/// let outcome = def.build(&Context::root(), &mut prompter).unwrap();
/// assert_eq!(outcome, Outcome::Value(Value::Null));
/// ```
pub fn optional_def<D: InputDefinition>(
    inner: D,
    is_active: impl Fn(&Context<'_>) -> bool + 'static,
) -> OptionalDef<D> {
    OptionalDef {
        inner,
        is_active: Box::new(is_active),
    }
}

impl<D: InputDefinition> OptionalDef<D> {
    /// The wrapped definition.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    fn active(&self, context: &Context<'_>) -> bool {
        (self.is_active)(context)
    }
}

impl<D: InputDefinition> InputDefinition for OptionalDef<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn build(&self, context: &Context<'_>, prompter: &mut dyn Prompter) -> InputResult {
        if !self.active(context) {
            debug!(name = self.name(), "inactive, skipping");
            return Ok(Outcome::Value(Value::Null));
        }
        self.inner.build(context, prompter)
    }

    fn summarize(&self, value: &Value, context: &Context<'_>) -> Summary {
        if self.active(context) {
            self.inner.summarize(value, context)
        } else {
            Summary::Uneditable
        }
    }

    fn update(
        &self,
        original: &Value,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        if !self.active(context) {
            return Ok(Outcome::Value(Value::Null));
        }
        if original.is_null() {
            // Nothing to edit yet.
            return self.inner.build(context, prompter);
        }
        self.inner.update(original, context, prompter)
    }

    fn update_if_needed(
        &self,
        original: &Value,
        change: &FieldChange<'_>,
        context: &Context<'_>,
        prompter: &mut dyn Prompter,
    ) -> InputResult {
        let was_active = self.active(&context.with_current(change.previous.clone()));
        let now_active = self.active(context);
        debug!(
            name = self.name(),
            changed = change.field,
            was_active,
            now_active,
            "re-evaluating activation"
        );
        match (was_active, now_active) {
            (_, false) => Ok(Outcome::Value(Value::Null)),
            (false, true) => self.inner.build(context, prompter),
            (true, true) => self
                .inner
                .update_if_needed(original, change, context, prompter),
        }
    }

    fn is_editable(&self) -> bool {
        self.inner.is_editable()
    }

    fn validate_final(&self, value: &Value, context: &Context<'_>) -> Result<(), String> {
        if value.is_null() {
            return Ok(());
        }
        self.inner.validate_final(value, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Answer, ScriptedPrompter, string_def};

    fn oauth_only() -> OptionalDef<crate::StringDef> {
        optional_def(string_def("Client secret"), |context| {
            context.field("kind").and_then(Value::as_str) == Some("oauth")
        })
    }

    fn record(kind: &str) -> Value {
        [("kind", kind)].into_iter().collect()
    }

    #[test]
    fn inactive_build_asks_nothing() {
        let root = Context::root();
        let context = root.push("App", record("basic"));
        let mut prompter = ScriptedPrompter::default();

        let outcome = oauth_only().build(&context, &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(Value::Null));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn active_build_delegates_once() {
        let root = Context::root();
        let context = root.push("App", record("oauth"));
        let mut prompter = ScriptedPrompter::new([Answer::text("s3cret")]);

        let outcome = oauth_only().build(&context, &mut prompter).unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("s3cret")));
        assert_eq!(prompter.asked(), ["Client secret"]);
    }

    #[test]
    fn inactive_is_uneditable() {
        let root = Context::root();
        let context = root.push("App", record("basic"));

        assert!(oauth_only().summarize(&Value::Null, &context).is_uneditable());
    }

    #[test]
    fn becoming_active_builds_fresh() {
        let root = Context::root();
        let before = record("basic");
        let context = root.push("App", record("oauth"));
        let change = FieldChange {
            field: "kind",
            previous: &before,
        };
        let mut prompter = ScriptedPrompter::new([Answer::text("s3cret")]);

        let outcome = oauth_only()
            .update_if_needed(&Value::Null, &change, &context, &mut prompter)
            .unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("s3cret")));
    }

    #[test]
    fn staying_active_keeps_value() {
        let root = Context::root();
        let before = record("oauth");
        let mut after = record("oauth");
        if let Value::Object(fields) = &mut after {
            fields.insert("name".to_string(), Value::from("changed"));
        }
        let context = root.push("App", after);
        let change = FieldChange {
            field: "name",
            previous: &before,
        };
        let mut prompter = ScriptedPrompter::default();

        let outcome = oauth_only()
            .update_if_needed(&Value::from("s3cret"), &change, &context, &mut prompter)
            .unwrap();

        assert_eq!(outcome, Outcome::Value(Value::from("s3cret")));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn becoming_inactive_clears_value() {
        let root = Context::root();
        let before = record("oauth");
        let context = root.push("App", record("basic"));
        let change = FieldChange {
            field: "kind",
            previous: &before,
        };
        let mut prompter = ScriptedPrompter::default();

        let outcome = oauth_only()
            .update_if_needed(&Value::from("s3cret"), &change, &context, &mut prompter)
            .unwrap();

        assert_eq!(outcome, Outcome::Value(Value::Null));
    }
}
