//! A tiny interactive command interpreter.
//!
//! Each prompt cycle reads one line from standard input, splits it on whitespace
//! into an argument vector, and either runs one of the builtins (`cd`, `help`,
//! `exit`) in-process or forks and executes the named program, waiting for it to
//! terminate before prompting again. There is no quoting, no redirection, no
//! pipelines and no job control.
//!
//! The main entry point is [`Interpreter`]. The lower-level pieces, [`reader`],
//! [`lexer`], [`builtin`] and [`external`], are public so each stage of the loop can
//! be driven on its own.

pub mod builtin;
pub mod command;
pub mod config;
pub mod error;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod reader;

pub use command::Status;
pub use config::Config;
pub use error::ShellError;
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
