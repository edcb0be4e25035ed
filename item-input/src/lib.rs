#![doc = include_str!("../README.md")]

// Re-export all types from item-input-types
pub use item_input_types::*;

mod definition;
pub use definition::{BoxedDefinition, ContextValidator, DefaultValue, FieldChange, InputDefinition};

mod menu;
pub use menu::{Choice, MenuAction, choose, show_help};

mod leaf;
pub use leaf::{
    BooleanDef, ComputedDef, IntegerDef, NumberDef, StaticDef, StringDef, TextCheck, boolean_def,
    computed_def, integer_def, number_def, optional_integer_def, optional_number_def,
    optional_string_def, static_def, string_def, undefined_def,
};

mod select;
pub use select::{DisplayFn, SelectDef, list_selection_def, select_def};

mod optional;
pub use optional::{ActivationPredicate, OptionalDef, optional_def};

mod object;
pub use object::{MAX_FIELDS_FOR_DEFAULT_ROLLUP, ObjectDef, Rollup, SummaryFn, object_def};

mod array;
pub use array::{ArrayDef, array_def};

mod checkbox;
pub use checkbox::{CheckboxDef, SelectionCheck, checkbox_def, string_checkbox_def};

mod command;
pub use command::{
    DEFAULT_INDENT, DriverOptions, FinishVerb, PreviewFormat, create_from_user_input,
    create_typed, render, update_from_user_input, update_typed,
};

// Scripted prompter for driving definitions without user interaction
mod scripted;
pub use scripted::{Answer, OfferedMenu, ScriptedPrompter};
