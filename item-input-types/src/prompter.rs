use crate::{Outcome, PromptError};

/// Validation callback for a single text answer.
///
/// Returns `Ok(())` to accept the answer, or `Err(message)` to show `message`
/// and ask the same question again.
pub type TextValidator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Validation callback for a whole multi-select answer (selected indices).
pub type SelectionValidator<'a> = &'a dyn Fn(&[usize]) -> Result<(), String>;

/// The terminal question service and console sink used by input definitions.
///
/// Implementations decide how questions are presented (colored prompts, plain
/// prompts, a replayed script). Each method blocks until the user answers.
/// Validation failures are handled inside the prompt: the rejection message is
/// shown and the question is asked again, so a returned answer is always valid.
///
/// Backing out of a question (Escape, Ctrl+C) is reported as
/// [`Outcome::Cancelled`], never as an error.
pub trait Prompter {
    /// Ask for a line of text. `default` is used when the user just hits enter.
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: TextValidator<'_>,
    ) -> Result<Outcome<String>, PromptError>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<Outcome<bool>, PromptError>;

    /// Let the user pick one of `items`, returning its index.
    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Outcome<usize>, PromptError>;

    /// Let the user check any number of `items`, returning the checked indices in order.
    fn multi_select(
        &mut self,
        message: &str,
        items: &[String],
        checked: &[bool],
        validate: SelectionValidator<'_>,
    ) -> Result<Outcome<Vec<usize>>, PromptError>;

    /// Show a message (help text, rejection notices) outside of any question.
    fn print(&mut self, message: &str);

    /// Ask for an integer. A blank answer yields `None`; `validate` sees the parsed value.
    fn integer(
        &mut self,
        message: &str,
        default: Option<i64>,
        validate: &dyn Fn(Option<i64>) -> Result<(), String>,
    ) -> Result<Outcome<Option<i64>>, PromptError> {
        let default = default.map(|value| value.to_string());
        let check = |input: &str| validate(parse_integer(input)?);
        let answer = self.text(message, default.as_deref(), &check)?;
        Ok(answer.map(|input| parse_integer(&input).ok().flatten()))
    }

    /// Ask for a floating-point number. A blank answer yields `None`.
    fn number(
        &mut self,
        message: &str,
        default: Option<f64>,
        validate: &dyn Fn(Option<f64>) -> Result<(), String>,
    ) -> Result<Outcome<Option<f64>>, PromptError> {
        let default = default.map(|value| value.to_string());
        let check = |input: &str| validate(parse_number(input)?);
        let answer = self.text(message, default.as_deref(), &check)?;
        Ok(answer.map(|input| parse_number(&input).ok().flatten()))
    }
}

/// Parse an optional integer answer: blank is `None`, anything else must be an integer.
pub fn parse_integer(input: &str) -> Result<Option<i64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| format!("{trimmed} is not a valid integer"))
}

/// Parse an optional number answer: blank is `None`, anything else must be a number.
pub fn parse_number(input: &str) -> Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("{trimmed} is not a valid number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_integer(""), Ok(None));
        assert_eq!(parse_integer(" 42 "), Ok(Some(42)));
        assert_eq!(parse_integer("-7"), Ok(Some(-7)));
        assert_eq!(
            parse_integer("4.5"),
            Err("4.5 is not a valid integer".to_string())
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number(""), Ok(None));
        assert_eq!(parse_number("4.5"), Ok(Some(4.5)));
        assert_eq!(parse_number("abc"), Err("abc is not a valid number".to_string()));
        assert_eq!(parse_number("NaN"), Err("NaN is not a valid number".to_string()));
    }
}
