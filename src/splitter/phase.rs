use crate::image::ColorChannel;

/// Assignment of the offsets 0, 1 and 2 (mod 3) of the next block to their
/// color channels.
///
/// The phase is never reset between blocks. After a block of length `L` it
/// is rotated left by `L mod 3`, so the value at absolute payload offset `k`
/// always belongs to `[Red, Green, Blue][k mod 3]`, however the payload is
/// chunked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelPhase([ColorChannel; 3]);

impl ChannelPhase {
    pub fn owner(&self, offset: usize) -> ColorChannel {
        self.0[offset % 3]
    }

    /// First offset inside the block that belongs to `channel`.
    pub fn start_offset(&self, channel: ColorChannel) -> usize {
        self.0
            .iter()
            .position(|&owner| owner == channel)
            .unwrap_or_else(|| unreachable!("every channel is part of the phase"))
    }

    pub fn advance(self, block_length: usize) -> Self {
        let mut owners = self.0;
        owners.rotate_left(block_length % 3);
        Self(owners)
    }
}

impl Default for ChannelPhase {
    fn default() -> Self {
        Self(ColorChannel::ALL)
    }
}
