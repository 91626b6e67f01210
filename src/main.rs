use std::env::args_os;
use std::process::ExitCode;

use collage::{run, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run(&arguments) {
        Ok(_) => {
            println!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
