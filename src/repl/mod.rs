//! REPL (Read-Eval-Print Loop) module
//!
//! Turns typed lines into session events.
//!
//! ## Module Structure
//!
//! - **command.rs**: Command definitions and conversion to AppEvent
//! - **parser.rs**: Manual string parsing for `:` commands and plain text
//!
//! ## Usage in main.rs
//!
//! ```rust,ignore
//! use textcard::repl::{command, parser};
//!
//! for line in stdin.lock().lines() {
//!     let event = command::command_to_app_event(parser::parse_repl_input(&line?));
//!     app.handle_event(event);
//! }
//! ```

pub mod command;
pub mod parser;

pub use command::{command_to_app_event, ReplCommand};
pub use parser::parse_repl_input;
