//! Interactive in-memory task tracker.
//!
//! [`interpreter::Interpreter`] handles one command line at a time and
//! [`repl::run`] drives it from any buffered reader.

pub mod commands;
pub mod config;
pub mod interpreter;
pub mod repl;
pub mod tokenizer;

pub use config::{Config, ConfigError};
pub use interpreter::{CommandError, Flow, Interpreter};
pub use tokenizer::ParseError;
