//! doctoc - table of contents generator for docs trees

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = doctoc::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
