use std::io::Write;

/// Legacy integer form of a dispatch result.
///
/// Non-zero keeps the prompt loop going, zero ends it. Kept for callers that still
/// want the plain number; the interpreter itself works with [`Status`].
pub type ExitCode = i32;

/// Outcome of running one command line, as seen by the prompt loop.
///
/// `Failed` means the command reported an error on the error stream but the loop
/// keeps going. Only `Terminate` stops it, and only the `exit` builtin produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Failed,
    Terminate,
}

impl Status {
    /// Whether the prompt loop should go around again.
    pub fn keeps_running(self) -> bool {
        !matches!(self, Status::Terminate)
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Continue | Status::Failed => 1,
            Status::Terminate => 0,
        }
    }
}

/// Uniform signature of every in-process command: `(argv, stdout, stderr) -> status`.
///
/// `argv[0]` is the command name itself.
pub type Handler = fn(&[&str], &mut dyn Write, &mut dyn Write) -> Status;
