/// Maximum width of a summary shown in an edit menu.
pub const MAX_ITEM_VALUE_LENGTH: usize = 60;

/// Number of menu entries shown at once by terminal prompters.
pub const PAGE_SIZE: usize = 20;

/// A one-line summary of a value for an edit menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Text shown after the field name, e.g. `Edit Name: Bob`.
    Text(String),

    /// The value cannot be edited interactively and is left out of edit menus.
    Uneditable,
}

impl Summary {
    /// Create a text summary.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Check if this summary marks an uneditable value.
    pub fn is_uneditable(&self) -> bool {
        matches!(self, Self::Uneditable)
    }

    /// Get the summary text, if editable.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Uneditable => None,
        }
    }
}

/// Clip `text` to at most `max` characters, ending clipped text with `...`.
pub fn clip_to_maximum(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
