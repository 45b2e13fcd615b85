use std::env::args_os;
use std::process::ExitCode;

use ppm_channel_splitter::{split_ppm_channels, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match split_ppm_channels(&arguments) {
        Ok(_) => {
            println!("All channel workers finished");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_header_error() => {
            eprintln!("Reading of PPM header failed: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Splitting failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
