use crate::builtin::find_builtin;
use crate::command::Status;
use crate::config::Config;
use crate::error::{ShellError, report};
use crate::external::launch;
use crate::lexer::{ArgVector, split_line};
use crate::reader::read_line;
use log::debug;
use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

/// A minimal interactive shell: prompt, read a line, split it, run it, repeat.
///
/// Builtins run in-process; anything else is launched as an external program and
/// waited for. The loop ends on the `exit` builtin or at end of input.
///
/// Example
/// ```
/// use lsh::{Config, Interpreter};
/// use std::io::Cursor;
///
/// let input = Cursor::new(b"help\nexit\n".to_vec());
/// let mut sh = Interpreter::new(Config::default(), input, Vec::new(), Vec::new());
/// sh.run().unwrap();
/// assert!(String::from_utf8_lossy(sh.stdout()).contains(" exit\n"));
/// ```
pub struct Interpreter<R, O, E> {
    config: Config,
    input: R,
    stdout: O,
    stderr: E,
}

impl Interpreter<StdinLock<'static>, Stdout, Stderr> {
    /// An interpreter wired to the process's own standard streams.
    pub fn stdio() -> Self {
        Self::new(Config::default(), io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, O: Write, E: Write> Interpreter<R, O, E> {
    pub fn new(config: Config, input: R, stdout: O, stderr: E) -> Self {
        Self {
            config,
            input,
            stdout,
            stderr,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stdout(&self) -> &O {
        &self.stdout
    }

    pub fn stderr(&self) -> &E {
        &self.stderr
    }

    /// Runs one command line.
    ///
    /// An empty line does nothing. Builtins are matched by exact name in table
    /// order; anything else is handed to the OS as a program to launch.
    pub fn execute(&mut self, argv: &ArgVector<'_>) -> Status {
        let Some(name) = argv.first() else {
            return Status::Continue;
        };

        if let Some(builtin) = find_builtin(name) {
            debug!("running builtin {:?}", name);
            return (builtin.handler)(argv.as_slice(), &mut self.stdout, &mut self.stderr);
        }

        // The child shares our stdout; anything still buffered would show up after its output.
        if let Err(err) = self.stdout.flush() {
            report(&mut self.stderr, &err);
        }
        debug!("launching external {:?}", name);
        launch(argv.as_slice(), &mut self.stderr)
    }

    /// One prompt cycle. Returns `None` once the input stream is exhausted.
    pub fn step(&mut self) -> Result<Option<Status>, ShellError> {
        write!(self.stdout, "{}", self.config.prompt)?;
        self.stdout.flush()?;

        let Some(line) = read_line(&mut self.input, self.config.line_chunk())? else {
            debug!("end of input");
            return Ok(None);
        };
        let argv = split_line(&line, self.config.token_chunk())?;
        Ok(Some(self.execute(&argv)))
    }

    /// Prompts and runs commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while let Some(status) = self.step()? {
            if !status.keeps_running() {
                break;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }
}
