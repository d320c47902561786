//! Filter and prescaler selections
//!
//! Both selectors are driven by a pair of digital lines. The encodings follow
//! the TCS230 truth table:
//!
//! ```text
//!  S2 S3  filter        S0 S1  output scaling
//!  L  L   red           L  L   power down
//!  L  H   blue          L  H   2%
//!  H  L   clear         H  L   20%
//!  H  H   green         H  H   100%
//! ```

use embedded_hal::digital::PinState;

/// Active photodiode filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSelection {
    Red,
    Green,
    Blue,
    /// No filter, all photodiodes
    #[default]
    Clear,
}

impl FilterSelection {
    /// Levels for the (S2, S3) lines
    pub const fn levels(self) -> (PinState, PinState) {
        match self {
            Self::Red => (PinState::Low, PinState::Low),
            Self::Blue => (PinState::Low, PinState::High),
            Self::Clear => (PinState::High, PinState::Low),
            Self::Green => (PinState::High, PinState::High),
        }
    }
}

/// Output frequency prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyScale {
    /// 100% of full-scale output
    #[default]
    High,
    /// 20%
    Mid,
    /// 2%
    Low,
    /// Output suppressed
    Off,
}

impl FrequencyScale {
    /// Levels for the (S0, S1) lines
    pub const fn levels(self) -> (PinState, PinState) {
        match self {
            Self::Off => (PinState::Low, PinState::Low),
            Self::Low => (PinState::Low, PinState::High),
            Self::Mid => (PinState::High, PinState::Low),
            Self::High => (PinState::High, PinState::High),
        }
    }

    pub const fn is_off(self) -> bool {
        matches!(self, Self::Off)
    }
}
