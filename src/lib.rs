//! Driver for TCS230/TCS3200 light-to-frequency color sensors
//!
//! The sensor outputs a square wave whose frequency follows the light
//! intensity seen through the selected photodiode filter. A read cycle
//! selects red, green and blue in turn, counts output edges over one gate
//! window for each, and keeps the three counts as a [`RawReading`].
//! [`Calibration`] maps those counts between a dark floor and a white ceiling
//! to an 8-bit RGB color.
//!
//! Edge counting is left to a [`FrequencyCounter`] implementation, the
//! select lines are any `embedded_hal` output pins.
#![no_std]

pub mod calibration;
pub mod controller;
pub mod counter;
pub mod error;
pub mod read_cycle;
pub mod reading;
pub mod selector;
pub mod sensor;

pub use calibration::{Calibration, compute_rgb};
pub use controller::{Controller, SelectorPins};
pub use counter::{EdgeCounter, EdgeTally, FrequencyCounter};
pub use error::Error;
pub use read_cycle::{Action, ReadState, Transition};
pub use reading::{ColorChannel, ColorReading, RawReading, Rgb};
pub use selector::{FilterSelection, FrequencyScale};
pub use sensor::{SensorConfig, Tcs230};

pub use embassy_time::{Duration, Instant};
