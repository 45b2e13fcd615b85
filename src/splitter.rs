use std::io::Read;
use std::sync::mpsc::Sender;

use crate::{
    error::Error,
    image::{ChannelValue, ColorChannel, Encoding, HeaderInfo},
};

mod phase;
mod tokenizer;

pub use phase::ChannelPhase;
pub use tokenizer::TextTokenizer;

/// Sending half of a channel stream. Dropping it closes the stream.
pub type ChannelSender = Sender<Vec<ChannelValue>>;

/// Values of one block, separated by channel and indexed by channel position.
pub type ChannelLanes<T> = [Vec<T>; 3];

/// Separates one block into its channel lanes and returns the phase for the
/// following block.
pub fn split_block<T: Copy>(
    phase: ChannelPhase,
    values: &[T],
) -> (ChannelLanes<T>, ChannelPhase) {
    let lanes: ChannelLanes<T> = ColorChannel::ALL.map(|channel| {
        values
            .iter()
            .skip(phase.start_offset(channel))
            .step_by(3)
            .copied()
            .collect()
    });
    (lanes, phase.advance(values.len()))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitStatistics {
    pub blocks: usize,
    pub values: usize,
}

/// Streams the payload in blocks of a fixed size and fans the values of each
/// block out to the three channel streams.
pub struct BlockSplitter<'a, R: Read> {
    header: &'a HeaderInfo,
    reader: R,
    block_size: usize,
    senders: [ChannelSender; 3],
    disconnected: [bool; 3],
}

impl<'a, R: Read> BlockSplitter<'a, R> {
    pub fn new(
        header: &'a HeaderInfo,
        reader: R,
        block_size: usize,
        senders: [ChannelSender; 3],
    ) -> crate::Result<Self> {
        if !header.is_valid() {
            return Err(Error::InvalidHeader);
        }
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(Self {
            header,
            reader,
            block_size,
            senders,
            disconnected: [false; 3],
        })
    }

    /// Splits the whole payload. All channel streams are closed when this
    /// returns, successfully or not.
    pub fn run(mut self) -> crate::Result<SplitStatistics> {
        let mut statistics = SplitStatistics::default();
        let mut phase = ChannelPhase::default();
        let mut tokenizer = TextTokenizer::new();
        let mut buffer = Vec::new();
        loop {
            let length = read_block(&mut self.reader, self.block_size, &mut buffer)?;
            let is_last_block = length < self.block_size;
            let mut values = self.decode_block(&buffer[..length], &mut tokenizer)?;
            if is_last_block {
                values.extend(tokenizer.finish()?);
            }
            log::debug!(
                "Block {}: {} bytes, {} values, phase {:?}",
                statistics.blocks,
                length,
                values.len(),
                phase
            );
            phase = self.dispatch(phase, &values);
            statistics.blocks += 1;
            statistics.values += values.len();
            if is_last_block {
                break;
            }
        }
        Ok(statistics)
    }

    fn decode_block(
        &self,
        block: &[u8],
        tokenizer: &mut TextTokenizer,
    ) -> crate::Result<Vec<ChannelValue>> {
        match self.header.encoding {
            Encoding::BinaryTriplet => Ok(block.iter().map(|&byte| byte.into()).collect()),
            Encoding::TextTriplet => tokenizer.feed(block),
        }
    }

    fn dispatch(&mut self, phase: ChannelPhase, values: &[ChannelValue]) -> ChannelPhase {
        let (lanes, next_phase) = split_block(phase, values);
        for (channel, lane) in ColorChannel::ALL.into_iter().zip(lanes) {
            let index = channel.index();
            if lane.is_empty() || self.disconnected[index] {
                continue;
            }
            if self.senders[index].send(lane).is_err() {
                log::warn!("Worker of {} channel stopped receiving", channel);
                self.disconnected[index] = true;
            }
        }
        next_phase
    }
}

/// Replaces the content of `buffer` with the next block. Returns less than
/// `block_size` only at the end of the stream. The buffer only grows as far
/// as data is actually read.
fn read_block<R: Read>(
    reader: &mut R,
    block_size: usize,
    buffer: &mut Vec<u8>,
) -> crate::Result<usize> {
    buffer.clear();
    reader
        .by_ref()
        .take(block_size as u64)
        .read_to_end(buffer)
        .map_err(Error::FailedToReadBlock)
}
