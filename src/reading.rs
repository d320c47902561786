//! Raw and calibrated readings
//!
//! A full read cycle produces one pulse count per color channel.
//! [`RawReading`] keeps those counts as measured, [`ColorReading`] is the
//! calibrated 0-255 result derived from them.

use core::ops::{Index, IndexMut};

use smart_leds::RGB8;

use crate::selector::FilterSelection;

pub type Rgb = RGB8;

/// Calibrated color, one 0-255 intensity per channel
pub type ColorReading = Rgb;

/// Color channels in measurement order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// All channels in the order a read cycle visits them
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Channel measured after this one, if any
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Red => Some(Self::Green),
            Self::Green => Some(Self::Blue),
            Self::Blue => None,
        }
    }

    /// Position in [`Self::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Photodiode filter that isolates this channel
    pub const fn filter(self) -> FilterSelection {
        match self {
            Self::Red => FilterSelection::Red,
            Self::Green => FilterSelection::Green,
            Self::Blue => FilterSelection::Blue,
        }
    }
}

/// Pulse counts accumulated over one gate window per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawReading {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl RawReading {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Same count on every channel
    pub const fn splat(value: i32) -> Self {
        Self::new(value, value, value)
    }

    pub const fn get(&self, channel: ColorChannel) -> i32 {
        match channel {
            ColorChannel::Red => self.r,
            ColorChannel::Green => self.g,
            ColorChannel::Blue => self.b,
        }
    }
}

impl Index<ColorChannel> for RawReading {
    type Output = i32;

    fn index(&self, channel: ColorChannel) -> &i32 {
        match channel {
            ColorChannel::Red => &self.r,
            ColorChannel::Green => &self.g,
            ColorChannel::Blue => &self.b,
        }
    }
}

impl IndexMut<ColorChannel> for RawReading {
    fn index_mut(&mut self, channel: ColorChannel) -> &mut i32 {
        match channel {
            ColorChannel::Red => &mut self.r,
            ColorChannel::Green => &mut self.g,
            ColorChannel::Blue => &mut self.b,
        }
    }
}

/// Convert a counter tally into a raw channel value, saturating at `i32::MAX`
pub(crate) fn count_to_raw(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
