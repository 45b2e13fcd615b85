use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_block_size_argument(command);
        let command = Self::register_input_file_argument(command);
        Self::register_output_directory_argument(command)
    }

    fn register_block_size_argument(command: Command) -> Command {
        command.arg(Self::create_block_size_argument())
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_block_size_argument() -> Arg {
        arg!(size: -s --size <BYTES> "Number of bytes read per block")
            .required(true)
            .value_parser(value_parser!(u64).range(1..))
    }

    fn create_input_file_argument() -> Arg {
        arg!(file: -f --file <FILE> "Path to PPM input file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory for histograms and channel images, defaults to the directory of the input file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            block_size: Self::extract_block_size_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
        }
    }

    fn extract_block_size_argument(matches: &ArgMatches) -> usize {
        let block_size = *matches
            .get_one::<u64>("size")
            .expect("Required argument size not provided");
        usize::try_from(block_size).expect("Argument value for size must be in range of usize")
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("file")
            .expect("Required argument file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_directory").cloned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
