use std::io::BufRead;

use super::{Encoding, HeaderInfo};
use crate::error::Error;

const FORMAT_TAG_TOKEN_NAME: &str = "Format Tag";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";

const DIMENSION_TOKEN_NAMES: [&str; 3] = [
    WIDTH_HEADER_TOKEN_NAME,
    HEIGHT_HEADER_TOKEN_NAME,
    MAX_VALUE_HEADER_TOKEN_NAME,
];

/// Reads the PPM header line by line.
///
/// The format tag comes first, followed by width, height and max value which
/// may be spread over any number of lines. Everything after a `#` up to the
/// end of its line is a comment. Reading stops right behind the line holding
/// the max value, so the reader is left at the first byte of the payload.
pub struct HeaderReader<'a, R: BufRead> {
    reader: &'a mut R,
    line: Vec<u8>,
    encoding: Option<Encoding>,
    values: Vec<u32>,
}

impl<'a, R: BufRead> HeaderReader<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            encoding: None,
            values: Vec::with_capacity(DIMENSION_TOKEN_NAMES.len()),
        }
    }

    pub fn read_header(mut self) -> crate::Result<HeaderInfo> {
        while !self.is_complete() {
            if !self.read_line()? {
                break;
            }
            self.consume_line()?;
        }
        self.build_header_info()
    }

    fn is_complete(&self) -> bool {
        self.encoding.is_some() && self.values.len() == DIMENSION_TOKEN_NAMES.len()
    }

    fn read_line(&mut self) -> crate::Result<bool> {
        self.line.clear();
        let bytes_read = self
            .reader
            .read_until(b'\n', &mut self.line)
            .map_err(Error::FailedToReadHeader)?;
        Ok(bytes_read > 0)
    }

    fn consume_line(&mut self) -> crate::Result<()> {
        let line = String::from_utf8_lossy(&self.line).into_owned();
        let content = line.split('#').next().unwrap_or_default();
        for token in content.split_whitespace() {
            if self.is_complete() {
                return Err(Error::PayloadOnHeaderLine);
            }
            self.consume_token(token)?;
        }
        Ok(())
    }

    fn consume_token(&mut self, token: &str) -> crate::Result<()> {
        if self.encoding.is_none() {
            let encoding = Encoding::from_tag(token)
                .ok_or_else(|| Error::UnsupportedFormatTag(token.to_owned()))?;
            self.encoding = Some(encoding);
            return Ok(());
        }
        let token_name = DIMENSION_TOKEN_NAMES[self.values.len()];
        let value = Self::parse_value(token, token_name)?;
        self.values.push(value);
        Ok(())
    }

    fn parse_value(token: &str, token_name: &'static str) -> crate::Result<u32> {
        let value: u32 = token
            .parse()
            .map_err(|_| Error::ParsingOfHeaderTokenFailed(token_name))?;
        if value == 0 {
            return Err(Error::ZeroHeaderValue(token_name));
        }
        Ok(value)
    }

    fn build_header_info(&self) -> crate::Result<HeaderInfo> {
        let encoding = self
            .encoding
            .ok_or(Error::MissingHeaderToken(FORMAT_TAG_TOKEN_NAME))?;
        if let Some(missing) = DIMENSION_TOKEN_NAMES.get(self.values.len()) {
            return Err(Error::MissingHeaderToken(*missing));
        }
        let max_value = u16::try_from(self.values[2])
            .map_err(|_| Error::ParsingOfHeaderTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        Ok(HeaderInfo {
            encoding,
            width: self.values[0],
            height: self.values[1],
            max_value,
        })
    }
}

pub fn read_header<R: BufRead>(reader: &mut R) -> crate::Result<HeaderInfo> {
    HeaderReader::new(reader).read_header()
}

/// Renders the three line header written in front of reconstructed images.
pub fn create_header(header: &HeaderInfo) -> String {
    format!(
        "{}\n{} {}\n{}\n",
        header.encoding.tag(),
        header.width,
        header.height,
        header.max_value
    )
}
