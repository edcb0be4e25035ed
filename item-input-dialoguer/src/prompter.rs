//! Dialoguer implementation of the `Prompter` trait.

use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use item_input::{
    Outcome, PAGE_SIZE, PromptError, Prompter, SelectionValidator, TextValidator,
};
use tracing::trace;

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

/// Turn a dialoguer result into an outcome, treating interruption as cancellation.
fn outcome<T>(result: dialoguer::Result<Option<T>>) -> Result<Outcome<T>, PromptError> {
    match result {
        Ok(answer) => Ok(Outcome::from(answer)),
        Err(e) if is_cancelled(&e) => Ok(Outcome::Cancelled),
        Err(e) => Err(PromptError::backend(e)),
    }
}

/// Terminal prompter built on `dialoguer`.
///
/// Text questions re-prompt in place when validation fails. Menus and
/// multi-selects can be left with Escape or `q`, which cancels.
#[derive(Debug, Default, Clone)]
pub struct DialoguerPrompter {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerPrompter {
    /// Create a new Dialoguer prompter with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a prompter with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }
}

impl Prompter for DialoguerPrompter {
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: TextValidator<'_>,
    ) -> Result<Outcome<String>, PromptError> {
        trace!(message, "text");
        let _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder
            .with_prompt(message)
            .allow_empty(true)
            .validate_with(|input: &String| validate(input));
        if let Some(default) = default {
            builder = builder.default(default.to_string());
        }

        match builder.interact_text() {
            Ok(answer) => Ok(Outcome::Value(answer)),
            Err(e) if is_cancelled(&e) => Ok(Outcome::Cancelled),
            Err(e) => Err(PromptError::backend(e)),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Outcome<bool>, PromptError> {
        trace!(message, "confirm");
        let mut builder: Confirm;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Confirm::with_theme(&_theme);
        } else {
            builder = Confirm::new();
        }

        builder = builder.with_prompt(message).default(default);
        outcome(builder.interact_opt())
    }

    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Outcome<usize>, PromptError> {
        trace!(message, items = items.len(), "select");
        let mut builder: Select;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder
            .with_prompt(message)
            .items(items)
            .max_length(PAGE_SIZE);
        if let Some(default) = default {
            builder = builder.default(default);
        }

        let index = outcome(builder.interact_opt())?;
        if let Outcome::Value(index) = index
            && index >= items.len()
        {
            return Err(PromptError::InvalidSelection(index));
        }
        Ok(index)
    }

    fn multi_select(
        &mut self,
        message: &str,
        items: &[String],
        checked: &[bool],
        validate: SelectionValidator<'_>,
    ) -> Result<Outcome<Vec<usize>>, PromptError> {
        trace!(message, items = items.len(), "multi select");
        let mut checked = checked.to_vec();
        loop {
            let mut builder: MultiSelect;
            let _theme;
            if self.colorful {
                _theme = ColorfulTheme::default();
                builder = MultiSelect::with_theme(&_theme);
            } else {
                builder = MultiSelect::new();
            }

            builder = builder
                .with_prompt(message)
                .items(items)
                .defaults(&checked)
                .max_length(PAGE_SIZE);

            let selection = match outcome(builder.interact_opt())? {
                Outcome::Value(selection) => selection,
                Outcome::Cancelled => return Ok(Outcome::Cancelled),
            };

            // Validate the selection
            if let Err(msg) = validate(&selection) {
                println!("Error: {msg}");
                checked = (0..items.len()).map(|i| selection.contains(&i)).collect();
                continue;
            }

            return Ok(Outcome::Value(selection));
        }
    }

    fn print(&mut self, message: &str) {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompter_creation() {
        let _prompter = DialoguerPrompter::new();
        let _plain = DialoguerPrompter::plain();
        assert!(!DialoguerPrompter::default().colorful);
    }

    #[test]
    fn interruption_is_cancellation() {
        let interrupted =
            dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::Interrupted));
        let broken = dialoguer::Error::IO(std::io::Error::from(std::io::ErrorKind::BrokenPipe));

        assert_eq!(
            outcome::<usize>(Err(interrupted)).unwrap(),
            Outcome::Cancelled
        );
        assert!(matches!(
            outcome::<usize>(Err(broken)),
            Err(PromptError::Backend(_))
        ));
        assert_eq!(outcome(Ok(Some(3))).unwrap(), Outcome::Value(3));
        assert_eq!(outcome::<usize>(Ok(None)).unwrap(), Outcome::Cancelled);
    }
}
