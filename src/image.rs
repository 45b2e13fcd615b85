use std::fmt::Display;

pub mod header;
pub mod reconstructor;

/// A single decoded color component. Binary payload bytes widen losslessly,
/// text payload values are bounded by the PPM max value (at most 65535).
pub type ChannelValue = u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// `P3`: whitespace separated decimal values
    TextTriplet,
    /// `P6`: one raw byte per value
    BinaryTriplet,
}

impl Encoding {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "P3" => Some(Self::TextTriplet),
            "P6" => Some(Self::BinaryTriplet),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::TextTriplet => "P3",
            Self::BinaryTriplet => "P6",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
    pub encoding: Encoding,
    pub width: u32,
    pub height: u32,
    pub max_value: u16,
}

impl HeaderInfo {
    pub fn is_valid(&self) -> bool {
        self.width != 0 && self.height != 0 && self.max_value != 0
    }

    /// `None` when `width × height` does not fit into `usize`.
    pub fn number_of_pixels(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Position of the channel inside a pixel triplet.
    pub fn index(&self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    pub fn initial(&self) -> char {
        match self {
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
        }
    }
}

impl Display for ColorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
