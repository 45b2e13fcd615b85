use std::fmt::Display;

use crate::image::ColorChannel;

#[derive(Debug)]
pub enum Error {
    MissingHeaderToken(&'static str),
    ParsingOfHeaderTokenFailed(&'static str),
    UnsupportedFormatTag(String),
    ZeroHeaderValue(&'static str),
    InvalidHeader,
    PayloadOnHeaderLine,
    InvalidBlockSize,
    ParsingOfTokenFailed(&'static str),
    ChannelLengthMismatch {
        channel: ColorChannel,
        expected: usize,
        actual: usize,
    },
    SampleExceedsByteRange(u16),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadHeader(std::io::Error),
    FailedToReadBlock(std::io::Error),
    FailedToWriteHistogram(String, std::io::Error),
    FailedToWriteImage(String, std::io::Error),
    ChannelWorkerFailed(ColorChannel),
}

impl Error {
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::MissingHeaderToken(_)
                | Self::ParsingOfHeaderTokenFailed(_)
                | Self::UnsupportedFormatTag(_)
                | Self::ZeroHeaderValue(_)
                | Self::InvalidHeader
                | Self::PayloadOnHeaderLine
                | Self::FailedToReadHeader(_)
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeaderToken(token_name) => {
                write!(f, "Expected token '{}' not found", token_name)
            }
            Self::ParsingOfHeaderTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::UnsupportedFormatTag(tag) => {
                write!(f, "Format tag '{}' is neither 'P3' nor 'P6'", tag)
            }
            Self::ZeroHeaderValue(token_name) => {
                write!(f, "Value of '{}' must not be zero", token_name)
            }
            Self::InvalidHeader => write!(f, "Header information is incomplete"),
            Self::PayloadOnHeaderLine => {
                write!(f, "Pixel data found on the max value line")
            }
            Self::InvalidBlockSize => write!(f, "Block size must be at least one byte"),
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::ChannelLengthMismatch {
                channel,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Length mismatch on {} channel: header announces {} values, but {} were received",
                    channel, expected, actual
                )
            }
            Self::SampleExceedsByteRange(value) => {
                write!(
                    f,
                    "Value {} does not fit into a single byte of a binary payload",
                    value
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadHeader(error) => {
                write!(f, "Reading of header lines failed: {}", error)
            }
            Self::FailedToReadBlock(error) => {
                write!(f, "Failed to read block of pixel data: {}", error)
            }
            Self::FailedToWriteHistogram(path, error) => {
                write!(f, "Failed to write histogram '{}': {}", path, error)
            }
            Self::FailedToWriteImage(path, error) => {
                write!(f, "Failed to write image '{}': {}", path, error)
            }
            Self::ChannelWorkerFailed(channel) => {
                write!(f, "Worker of {} channel terminated without a result", channel)
            }
        }
    }
}

impl std::error::Error for Error {}
