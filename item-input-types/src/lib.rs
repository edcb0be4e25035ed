//! Core types for the item-input crate.
//!
//! This crate provides the presentation-agnostic foundation of item-input:
//! - `Value` - The dynamic value built or edited by input definitions
//! - `Outcome` and `LoopExit` - Value-or-cancellation results and edit-loop exits
//! - `Summary` - One-line summaries for edit menus
//! - `Context` - The chain of already-decided ancestor values
//! - `Prompter` - The terminal question service backends implement

mod value;
pub use value::Value;

mod outcome;
pub use outcome::{LoopExit, Outcome};

mod summary;
pub use summary::{MAX_ITEM_VALUE_LENGTH, PAGE_SIZE, Summary, clip_to_maximum};

mod context;
pub use context::{Context, Slot};

mod error;
pub use error::{InputError, PromptError};

mod prompter;
pub use prompter::{Prompter, SelectionValidator, TextValidator, parse_integer, parse_number};

/// Result of every build, update and recompute operation.
pub type InputResult<T = Value> = Result<Outcome<T>, InputError>;
