use std::io::Write;

use super::{header::create_header, ChannelValue, ColorChannel, Encoding, HeaderInfo};
use crate::error::Error;

/// An image in which only one channel carries values, the other two
/// components of every pixel are zero.
#[derive(Debug)]
pub struct ReconstructedImage {
    header: HeaderInfo,
    samples: Vec<ChannelValue>,
}

impl ReconstructedImage {
    /// Interleaved pixel components, three per pixel.
    pub fn samples(&self) -> &[ChannelValue] {
        &self.samples
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(create_header(&self.header).as_bytes())?;
        match self.header.encoding {
            Encoding::BinaryTriplet => self.write_binary_payload(writer)?,
            Encoding::TextTriplet => self.write_text_payload(writer)?,
        }
        writer.flush()
    }

    fn write_binary_payload<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        // samples were range checked on construction
        let bytes: Vec<u8> = self.samples.iter().map(|&sample| sample as u8).collect();
        writer.write_all(&bytes)
    }

    fn write_text_payload<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for pixel in self.samples.chunks(3) {
            writeln!(writer, "{} {} {}", pixel[0], pixel[1], pixel[2])?;
        }
        Ok(())
    }
}

pub struct ImageReconstructor<'a> {
    header: &'a HeaderInfo,
    channel: ColorChannel,
}

impl<'a> ImageReconstructor<'a> {
    pub fn new(header: &'a HeaderInfo, channel: ColorChannel) -> Self {
        Self { header, channel }
    }

    pub fn reconstruct(&self, values: &[ChannelValue]) -> crate::Result<ReconstructedImage> {
        self.check_values_length_match_header_information(values)?;
        if self.header.encoding == Encoding::BinaryTriplet {
            Self::check_values_fit_into_bytes(values)?;
        }
        let position = self.channel.index();
        let mut samples = vec![0; values.len() * 3];
        for (pixel, &value) in samples.chunks_exact_mut(3).zip(values) {
            pixel[position] = value;
        }
        Ok(ReconstructedImage {
            header: *self.header,
            samples,
        })
    }

    fn check_values_length_match_header_information(
        &self,
        values: &[ChannelValue],
    ) -> crate::Result<()> {
        let expected = self.header.number_of_pixels();
        if expected != Some(values.len()) {
            return Err(Error::ChannelLengthMismatch {
                channel: self.channel,
                expected: expected.unwrap_or(usize::MAX),
                actual: values.len(),
            });
        }
        Ok(())
    }

    fn check_values_fit_into_bytes(values: &[ChannelValue]) -> crate::Result<()> {
        match values.iter().find(|&&value| value > u8::MAX as ChannelValue) {
            Some(&value) => Err(Error::SampleExceedsByteRange(value)),
            None => Ok(()),
        }
    }
}
