//! Shadowr - layered box-shadow editor for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shadowr::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
