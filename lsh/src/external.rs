use crate::command::Status;
use crate::config::PROGRAM_NAME;
use crate::error::{ShellError, report};
use log::{debug, trace, warn};
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, execvp, fork};
use std::ffi::CString;
use std::io::Write;

/// How a launched program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Returned from `main` or called `exit` with this code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(Signal),
}

/// Runs `argv[0]` as an external program and waits for it to finish.
///
/// The program is looked up through `PATH` by the OS, and inherits the environment,
/// the working directory and the standard streams of the shell. Whatever the program
/// does, the loop keeps running: the result is `Continue` once it has terminated,
/// and `Failed` (already reported on `stderr`) when it could not be started or waited for.
pub fn launch(argv: &[&str], stderr: &mut dyn Write) -> Status {
    match run_external(argv) {
        Ok(exit) => {
            debug!("{:?} finished: {:?}", argv.first(), exit);
            Status::Continue
        }
        Err(err) => {
            report(stderr, &err);
            Status::Failed
        }
    }
}

/// Forks, replaces the child with `argv[0]`, and waits until it exits or is killed.
///
/// A child that fails to exec reports the error itself and exits with status 1, so
/// a missing program shows up here as `Exited(1)`.
pub fn run_external(argv: &[&str]) -> Result<ChildExit, ShellError> {
    let args = to_c_args(argv)?;
    if args.is_empty() {
        return Err(ShellError::InvalidArgument(String::new()));
    }

    // SAFETY: the interpreter is single-threaded; the child only calls execvp, write(2)
    // and _exit(2) before it is replaced or gone.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => exec_child(&args),
        Ok(ForkResult::Parent { child }) => {
            debug!("spawned {:?} as pid {}", argv[0], child);
            wait_for(child).map_err(|errno| {
                warn!("waiting for pid {} failed: {}", child, errno);
                ShellError::Os(errno)
            })
        }
        Err(errno) => {
            warn!("fork failed: {}", errno);
            Err(ShellError::Os(errno))
        }
    }
}

fn to_c_args(argv: &[&str]) -> Result<Vec<CString>, ShellError> {
    argv.iter()
        .map(|arg| CString::new(*arg).map_err(|_| ShellError::InvalidArgument(arg.to_string())))
        .collect()
}

/// Never returns into the interpreter: either the image is replaced or the process exits.
fn exec_child(args: &[CString]) -> ! {
    let errno = match execvp(&args[0], args) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };

    // Raw writes to fd 2: no locks, no allocation, no buffered data from the parent.
    let stderr = std::io::stderr();
    for part in [PROGRAM_NAME, ": ", errno.desc(), "\n"] {
        let _ = nix::unistd::write(&stderr, part.as_bytes());
    }
    // SAFETY: _exit(2) ends the process without running atexit handlers, destructors or
    // unwinding, so nothing of the parent's state is touched in the child.
    unsafe { nix::libc::_exit(1) }
}

/// Waits on `child` until it has exited or been killed; stop notifications are skipped.
fn wait_for(child: Pid) -> nix::Result<ChildExit> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ChildExit::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(ChildExit::Signaled(signal)),
            Ok(status) => trace!("pid {} still running: {:?}", child, status),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(errno),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_is_observed() {
        assert_eq!(run_external(&["true"]).unwrap(), ChildExit::Exited(0));
        assert_eq!(run_external(&["false"]).unwrap(), ChildExit::Exited(1));
        assert_eq!(
            run_external(&["sh", "-c", "exit 7"]).unwrap(),
            ChildExit::Exited(7)
        );
    }

    #[test]
    fn test_arguments_are_passed_through() {
        let exit = run_external(&["sh", "-c", "test \"$0 $1\" = \"a b\"", "a", "b"]).unwrap();
        assert_eq!(exit, ChildExit::Exited(0));
    }

    #[test]
    fn test_missing_program_exits_child_with_failure() {
        let exit = run_external(&["lsh-test-no-such-program-9f2c"]).unwrap();
        assert_eq!(exit, ChildExit::Exited(1));
    }

    #[test]
    fn test_signal_termination_ends_wait() {
        let exit = run_external(&["sh", "-c", "kill -TERM $$"]).unwrap();
        assert_eq!(exit, ChildExit::Signaled(Signal::SIGTERM));
    }

    #[test]
    fn test_stopped_child_is_waited_until_exit() {
        // The child stops itself and a background helper resumes it a moment later.
        let script = "(sleep 1; kill -CONT $$) & kill -STOP $$; exit 4";
        let exit = run_external(&["sh", "-c", script]).unwrap();
        assert_eq!(exit, ChildExit::Exited(4));
    }

    #[test]
    fn test_launch_always_continues() {
        let mut err = Vec::new();
        assert_eq!(launch(&["false"], &mut err), Status::Continue);
        assert_eq!(
            launch(&["lsh-test-no-such-program-9f2c"], &mut err),
            Status::Continue
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_nul_in_argument_is_reported_without_forking() {
        let mut err = Vec::new();
        let status = launch(&["echo", "a\0b"], &mut err);
        assert_eq!(status, Status::Failed);
        assert!(status.keeps_running());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "lsh: invalid argument: \"a\\0b\"\n"
        );
    }
}
