use crate::command::{Handler, Status};
use crate::error::{ShellError, report};
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use log::warn;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed directly
/// in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    const NAME: &'static str;

    /// Executes the command, writing any regular output to `stdout`.
    fn execute(self, stdout: &mut dyn Write) -> Result<Status>;
}

/// Parses `argv` into `T` and runs it, reporting any failure on `stderr`.
///
/// Every argument is positional: a leading `--` keeps argh from treating `help`,
/// `--help` or anything dash-prefixed as an option.
fn run<T: BuiltinCommand>(argv: &[&str], stdout: &mut dyn Write, stderr: &mut dyn Write) -> Status {
    let (name, args): (&str, &[&str]) = match argv.split_first() {
        Some((name, args)) => (*name, args),
        None => (T::NAME, &[]),
    };
    let mut positional = Vec::with_capacity(args.len() + 1);
    positional.push("--");
    positional.extend_from_slice(args);

    let cmd = match T::from_args(&[name], &positional) {
        Ok(cmd) => cmd,
        Err(EarlyExit {
            output,
            status: Ok(()),
        }) => {
            let _ = write!(stdout, "{}", output);
            return Status::Continue;
        }
        Err(EarlyExit {
            output,
            status: Err(()),
        }) => {
            report(stderr, &ShellError::Usage(output));
            return Status::Failed;
        }
    };

    match cmd.execute(stdout) {
        Ok(status) => status,
        Err(err) => {
            report(stderr, &err);
            Status::Failed
        }
    }
}

/// One entry of the builtin table.
pub struct Builtin {
    pub name: &'static str,
    pub handler: Handler,
}

/// Every builtin, in the order they are matched and listed by `help`.
pub static BUILTINS: [Builtin; 3] = [
    Builtin {
        name: Cd::NAME,
        handler: run::<Cd>,
    },
    Builtin {
        name: Help::NAME,
        handler: run::<Help>,
    },
    Builtin {
        name: Exit::NAME,
        handler: run::<Exit>,
    },
];

pub fn builtin_count() -> usize {
    BUILTINS.len()
}

pub fn builtin_name(index: usize) -> Option<&'static str> {
    BUILTINS.get(index).map(|b| b.name)
}

pub fn builtin_handler(index: usize) -> Option<Handler> {
    BUILTINS.get(index).map(|b| b.handler)
}

/// Finds a builtin by exact, case-sensitive name, scanning in table order.
pub fn find_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; absolute or relative to the current directory.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    const NAME: &'static str = "cd";

    fn execute(self, _stdout: &mut dyn Write) -> Result<Status> {
        let target = self
            .args
            .first()
            .ok_or(ShellError::MissingArgument { command: Self::NAME })?;

        nix::unistd::chdir(target.as_str()).map_err(|errno| {
            warn!("chdir to {:?} failed: {}", target, errno);
            ShellError::Os(errno)
        })?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Print a short description of the shell and its built-in commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    const NAME: &'static str = "help";

    fn execute(self, stdout: &mut dyn Write) -> Result<Status> {
        writeln!(stdout, "LSH")?;
        writeln!(stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(stdout, "The following are built-in:")?;
        for builtin in &BUILTINS {
            writeln!(stdout, " {}", builtin.name)?;
        }
        writeln!(stdout, "Use the man command for information on other programs.")?;
        stdout.flush()?;
        Ok(Status::Continue)
    }
}

#[derive(FromArgs)]
/// Exit shell process
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    const NAME: &'static str = "exit";

    fn execute(self, _stdout: &mut dyn Write) -> Result<Status> {
        Ok(Status::Terminate)
    }
}
