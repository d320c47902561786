//! Dark/white calibration and the raw-to-RGB transform
//!
//! Each channel is mapped linearly between its dark floor and white ceiling,
//! clamped, and scaled to 0-255.

use crate::reading::{ColorChannel, ColorReading, RawReading};

/// Output for a channel whose dark and white references are equal
pub const DEGENERATE_CHANNEL_VALUE: u8 = 0;

/// Typical dark counts for a TCS230 at 100% scaling and a 100 ms gate
pub const DEFAULT_DARK: RawReading = RawReading::splat(6_000);

/// Typical white counts for a TCS230 at 100% scaling and a 100 ms gate
pub const DEFAULT_WHITE: RawReading = RawReading::splat(55_000);

/// Reference counts that define each channel's zero and full-scale points
///
/// No ordering between `dark` and `white` is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub dark: RawReading,
    pub white: RawReading,
}

impl Calibration {
    pub const fn new(dark: RawReading, white: RawReading) -> Self {
        Self { dark, white }
    }

    /// Whether `channel` has no usable range
    pub const fn is_degenerate(&self, channel: ColorChannel) -> bool {
        self.dark.get(channel) == self.white.get(channel)
    }

    /// Convert a raw reading to calibrated color
    pub fn apply(&self, raw: &RawReading) -> ColorReading {
        compute_rgb(raw, &self.dark, &self.white)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(DEFAULT_DARK, DEFAULT_WHITE)
    }
}

/// Map raw counts to 0-255 per channel using dark/white references
pub fn compute_rgb(raw: &RawReading, dark: &RawReading, white: &RawReading) -> ColorReading {
    let [r, g, b] = ColorChannel::ALL.map(|channel| {
        scale_channel(raw[channel], dark[channel], white[channel])
    });
    ColorReading { r, g, b }
}

/// Scale a single channel, clamped to `[0, 255]`
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_channel(raw: i32, dark: i32, white: i32) -> u8 {
    let span = i64::from(white) - i64::from(dark);
    if span == 0 {
        return DEGENERATE_CHANNEL_VALUE;
    }
    let offset = i64::from(raw) - i64::from(dark);
    let scaled = (offset as f32 / span as f32).clamp(0.0, 1.0);

    libm::roundf(scaled * 255.0) as u8
}
