use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use crate::{
    error::Error,
    histogram::Histogram,
    image::{
        reconstructor::{ImageReconstructor, ReconstructedImage},
        ChannelValue, ColorChannel, HeaderInfo,
    },
    open_output_file, OutputNaming,
};

#[derive(Debug, PartialEq, Eq)]
pub struct ChannelSummary {
    pub channel: ColorChannel,
    pub value_count: usize,
    pub distinct_values: usize,
}

/// Consumes the stream of one color channel. Once the stream is closed it
/// writes the histogram report and the reconstructed single channel image.
pub struct ChannelWorker {
    channel: ColorChannel,
    header: HeaderInfo,
    histogram_path: PathBuf,
    image_path: PathBuf,
}

impl ChannelWorker {
    pub fn new(channel: ColorChannel, header: HeaderInfo, naming: &OutputNaming) -> Self {
        Self {
            channel,
            header,
            histogram_path: naming.histogram_path(channel),
            image_path: naming.image_path(channel),
        }
    }

    pub fn run(self, receiver: Receiver<Vec<ChannelValue>>) -> crate::Result<ChannelSummary> {
        let mut values = Vec::new();
        let mut histogram = Histogram::new();
        for batch in receiver {
            histogram.record_all(&batch);
            values.extend(batch);
        }
        log::info!(
            "Stream of {} channel closed after {} values",
            self.channel,
            values.len()
        );
        self.write_histogram(&histogram)?;
        let image = ImageReconstructor::new(&self.header, self.channel).reconstruct(&values)?;
        self.write_image(&image)?;
        Ok(ChannelSummary {
            channel: self.channel,
            value_count: values.len(),
            distinct_values: histogram.distinct_values(),
        })
    }

    fn write_histogram(&self, histogram: &Histogram) -> crate::Result<()> {
        let file = open_output_file(&self.histogram_path)?;
        histogram
            .write_report(self.channel, &mut BufWriter::new(file))
            .map_err(|e| Error::FailedToWriteHistogram(display_path(&self.histogram_path), e))
    }

    fn write_image(&self, image: &ReconstructedImage) -> crate::Result<()> {
        let file = open_output_file(&self.image_path)?;
        image
            .write_to(&mut BufWriter::new(file))
            .map_err(|e| Error::FailedToWriteImage(display_path(&self.image_path), e))
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
