use std::process::ExitCode;

fn main() -> ExitCode {
    hostver::cli::run()
}
