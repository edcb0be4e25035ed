//! Scripted prompter for driving definitions without user interaction.
//!
//! `ScriptedPrompter` answers questions from a queue of pre-defined answers and
//! records everything it was asked, so tests can assert both the result and
//! the conversation that led to it.
//!
//! # Example
//!
//! ```rust
//! use item_input::{Answer, Context, InputDefinition, Outcome, ScriptedPrompter, Value, string_def};
//!
//! let mut prompter = ScriptedPrompter::new([Answer::text("Bob")]);
//! let outcome = string_def("Name").build(&Context::root(), &mut prompter).unwrap();
//!
//! assert_eq!(outcome, Outcome::Value(Value::from("Bob")));
//! assert_eq!(prompter.asked(), ["Name"]);
//! ```

use std::collections::VecDeque;

use crate::{Outcome, PromptError, Prompter, SelectionValidator, TextValidator};

/// One scripted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Type this text and hit enter.
    Text(String),

    /// Hit enter without typing: accept the default of a text, confirm or
    /// select question, or keep the pre-checked items of a multi-select.
    Default,

    /// Answer a yes/no question.
    Bool(bool),

    /// Pick the menu entry with exactly this label.
    Select(String),

    /// Check exactly the entries with these labels.
    Check(Vec<String>),

    /// Back out of the question (Escape / Ctrl+C).
    Cancel,
}

impl Answer {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn select(label: impl Into<String>) -> Self {
        Self::Select(label.into())
    }

    pub fn check<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Check(labels.into_iter().map(Into::into).collect())
    }
}

/// A menu (select or multi-select question) as it was offered.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferedMenu {
    pub message: String,
    pub items: Vec<String>,
}

/// A prompter that replays scripted answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
    menus: Vec<OfferedMenu>,
    rejections: Vec<String>,
    printed: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter answering with `answers`, in order.
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue another answer.
    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.push_back(answer);
        self
    }

    /// Messages of all questions asked, menus included, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// All menus offered, in order.
    pub fn menus(&self) -> &[OfferedMenu] {
        &self.menus
    }

    /// The most recently offered menu.
    pub fn last_menu(&self) -> Option<&OfferedMenu> {
        self.menus.last()
    }

    /// Validation messages shown for rejected answers.
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Everything printed outside of questions.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, message: &str) -> Result<Answer, PromptError> {
        self.answers.pop_front().ok_or_else(|| {
            PromptError::Script(format!("no scripted answer left for '{message}'"))
        })
    }

    fn unexpected(message: &str, answer: &Answer) -> PromptError {
        PromptError::Script(format!("unexpected answer {answer:?} for '{message}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: TextValidator<'_>,
    ) -> Result<Outcome<String>, PromptError> {
        self.asked.push(message.to_string());
        loop {
            let candidate = match self.next_answer(message)? {
                Answer::Text(text) => text,
                Answer::Default => default.unwrap_or_default().to_string(),
                Answer::Cancel => return Ok(Outcome::Cancelled),
                other => return Err(Self::unexpected(message, &other)),
            };
            match validate(&candidate) {
                Ok(()) => return Ok(Outcome::Value(candidate)),
                Err(rejection) => self.rejections.push(rejection),
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Outcome<bool>, PromptError> {
        self.asked.push(message.to_string());
        match self.next_answer(message)? {
            Answer::Bool(answer) => Ok(Outcome::Value(answer)),
            Answer::Default => Ok(Outcome::Value(default)),
            Answer::Cancel => Ok(Outcome::Cancelled),
            other => Err(Self::unexpected(message, &other)),
        }
    }

    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Outcome<usize>, PromptError> {
        self.asked.push(message.to_string());
        self.menus.push(OfferedMenu {
            message: message.to_string(),
            items: items.to_vec(),
        });
        match self.next_answer(message)? {
            Answer::Select(label) => items
                .iter()
                .position(|item| *item == label)
                .map(Outcome::Value)
                .ok_or_else(|| {
                    PromptError::Script(format!(
                        "'{label}' is not offered by '{message}'; offered: {items:?}"
                    ))
                }),
            Answer::Default => default.map(Outcome::Value).ok_or_else(|| {
                PromptError::Script(format!("'{message}' has no default entry"))
            }),
            Answer::Cancel => Ok(Outcome::Cancelled),
            other => Err(Self::unexpected(message, &other)),
        }
    }

    fn multi_select(
        &mut self,
        message: &str,
        items: &[String],
        checked: &[bool],
        validate: SelectionValidator<'_>,
    ) -> Result<Outcome<Vec<usize>>, PromptError> {
        self.asked.push(message.to_string());
        self.menus.push(OfferedMenu {
            message: message.to_string(),
            items: items.to_vec(),
        });
        loop {
            let selection: Vec<usize> = match self.next_answer(message)? {
                Answer::Check(labels) => {
                    let mut indices = Vec::with_capacity(labels.len());
                    for label in &labels {
                        let index = items.iter().position(|item| item == label).ok_or_else(
                            || {
                                PromptError::Script(format!(
                                    "'{label}' is not offered by '{message}'"
                                ))
                            },
                        )?;
                        indices.push(index);
                    }
                    indices.sort_unstable();
                    indices.dedup();
                    indices
                }
                Answer::Default => (0..items.len())
                    .filter(|&index| checked.get(index).copied().unwrap_or(false))
                    .collect(),
                Answer::Cancel => return Ok(Outcome::Cancelled),
                other => return Err(Self::unexpected(message, &other)),
            };
            match validate(&selection) {
                Ok(()) => return Ok(Outcome::Value(selection)),
                Err(rejection) => self.rejections.push(rejection),
            }
        }
    }

    fn print(&mut self, message: &str) {
        self.printed.push(message.to_string());
    }
}
