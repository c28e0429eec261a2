//! taskcat - category tasks for delimiter-named build tasks

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = task_categorizer::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
