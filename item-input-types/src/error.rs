/// Error raised by a [`Prompter`](crate::Prompter) when it cannot ask a question.
///
/// A user backing out of a prompt is not an error; prompters report it as
/// [`Outcome::Cancelled`](crate::Outcome::Cancelled).
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The terminal could not be read or written.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// The backend returned a selection outside of the offered items.
    #[error("Selection {0} is out of range")]
    InvalidSelection(usize),

    /// A scripted prompter was asked something its script does not answer.
    #[error("Script error: {0}")]
    Script(String),
}

impl PromptError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}

/// Error type for building and updating values.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The question service failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// A list was declared with an item definition that cannot be edited.
    #[error("The item definition used for {name} must be editable")]
    UneditableItem { name: String },

    /// A value could not be converted to or from a typed structure.
    #[error("Value conversion failed: {0}")]
    Conversion(#[from] serde_json::Error),

    /// A value could not be rendered for preview.
    #[error("Failed to render value: {0}")]
    Render(String),
}

impl InputError {
    /// Check if this error comes from misuse of the definitions rather than the terminal.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::UneditableItem { .. })
    }
}
