//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use courier_cli::CliError;

fn main() {
    match courier_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("courier: {err}");
            std::process::exit(1);
        }
    }
}
