//! # item-input-dialoguer
//!
//! Dialoguer prompter for item-input.
//!
//! This crate provides the terminal question service for item-input
//! definitions using the `dialoguer` library. Questions are presented
//! one at a time in a classic CLI style; menus are scrollable selects.
//!
//! ## Example
//!
//! ```rust,no_run
//! use item_input::{DriverOptions, Outcome, create_from_user_input, object_def, string_def};
//! use item_input_dialoguer::DialoguerPrompter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let def = object_def("User").field("name", string_def("Name"));
//!     let mut prompter = DialoguerPrompter::new();
//!
//!     match create_from_user_input(&def, &mut prompter, &DriverOptions::default())? {
//!         Outcome::Value(user) => println!("Hello, {}!", user.field("name")),
//!         Outcome::Cancelled => println!("Cancelled."),
//!     }
//!     Ok(())
//! }
//! ```

mod prompter;

pub use prompter::DialoguerPrompter;
