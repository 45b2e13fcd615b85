use std::str;

use crate::{error::Error, image::ChannelValue};

const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

/// Decodes a whitespace separated text payload block by block.
///
/// A token cut in two by a block boundary is held back and completed by the
/// following block.
#[derive(Default)]
pub struct TextTokenizer {
    pending: Vec<u8>,
}

impl TextTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, block: &[u8]) -> crate::Result<Vec<ChannelValue>> {
        let mut values = Vec::with_capacity(block.len() / 2);
        for &byte in block {
            if byte.is_ascii_whitespace() {
                if let Some(value) = self.take_pending()? {
                    values.push(value);
                }
            } else {
                self.pending.push(byte);
            }
        }
        Ok(values)
    }

    /// Decodes a token left over at the end of the payload.
    pub fn finish(&mut self) -> crate::Result<Option<ChannelValue>> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> crate::Result<Option<ChannelValue>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let value = Self::parse_color_value(&self.pending)?;
        self.pending.clear();
        Ok(Some(value))
    }

    fn parse_color_value(token: &[u8]) -> crate::Result<ChannelValue> {
        str::from_utf8(token)
            .ok()
            .and_then(|token| token.parse().ok())
            .ok_or(Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}
