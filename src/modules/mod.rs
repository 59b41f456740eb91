//! Input modules
//!
//! - search: the search field, a `Module` that edits the filter text
//! - keymap: bindings used while no field has focus

pub mod keymap;
pub mod search;

pub use search::SearchField;
