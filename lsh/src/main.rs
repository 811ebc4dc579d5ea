use lsh::Interpreter;
use lsh::error::report;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    // Arguments passed to the shell itself are ignored.
    let mut sh = Interpreter::stdio();
    match sh.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_fatal() => {
            report(&mut std::io::stderr(), &err);
            ExitCode::FAILURE
        }
        Err(err) => {
            report(&mut std::io::stderr(), &err);
            ExitCode::SUCCESS
        }
    }
}
