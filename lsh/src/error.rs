use crate::config::PROGRAM_NAME;
use nix::errno::Errno;
use std::collections::TryReserveError;
use std::fmt::Display;
use std::io::Write;

/// Every failure the interpreter knows how to report.
///
/// Only [`ShellError::Allocation`] is fatal; everything else is printed as
/// `lsh: <message>` and the loop carries on with the next prompt.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A builtin was invoked without an argument it cannot work without.
    #[error("expected argument to \"{command}\"")]
    MissingArgument { command: &'static str },

    /// A raw OS error, displayed the way `perror` would describe it.
    #[error("{}", .0.desc())]
    Os(#[from] Errno),

    /// Usage text produced by the argument parser of a builtin.
    #[error("{0}")]
    Usage(String),

    /// A token cannot be handed to the OS, e.g. it holds an interior NUL byte.
    #[error("invalid argument: {0:?}")]
    InvalidArgument(String),

    /// Reading the interactive input stream failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A line or argument buffer could not grow.
    #[error("allocation error")]
    Allocation(#[from] TryReserveError),
}

impl ShellError {
    /// Whether the interpreter must stop immediately with a failure code.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Allocation(_))
    }
}

/// Writes `lsh: <message>` to `stderr`.
///
/// A failing error stream has nowhere left to report to, so write errors are dropped.
pub fn report(stderr: &mut dyn Write, err: &dyn Display) {
    let message = err.to_string();
    let _ = writeln!(stderr, "{}: {}", PROGRAM_NAME, message.trim_end());
    let _ = stderr.flush();
}
