//! Filter/scaler select lines
//!
//! The S2/S3 pair picks the photodiode filter and is always wired. The S0/S1
//! prescaler pair and the active-low output enable are optional.

use embedded_hal::digital::{OutputPin, PinState};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::selector::{FilterSelection, FrequencyScale};

/// Lines returned by [`Controller::release`]
pub struct SelectorPins<P> {
    pub s2: P,
    pub s3: P,
    pub scale: Option<(P, P)>,
    pub oe: Option<P>,
}

/// Drives the filter, prescaler and enable lines of the sensor
pub struct Controller<P> {
    s2: P,
    s3: P,
    scale: Option<(P, P)>,
    oe: Option<P>,

    filter: FilterSelection,
    frequency: FrequencyScale,
    /// Last prescaler setting other than `Off`
    active_frequency: FrequencyScale,
    enabled: bool,
}

impl<P: OutputPin> Controller<P> {
    /// Filter lines only, prescaler and enable are hard-wired
    pub const fn new(s2: P, s3: P) -> Self {
        Self::from_parts(s2, s3, None, None)
    }

    /// Filter lines and output enable
    pub const fn with_enable(s2: P, s3: P, oe: P) -> Self {
        Self::from_parts(s2, s3, None, Some(oe))
    }

    /// Filter and prescaler lines
    pub const fn with_scaler(s2: P, s3: P, s0: P, s1: P) -> Self {
        Self::from_parts(s2, s3, Some((s0, s1)), None)
    }

    /// Every control line wired
    pub const fn with_all(s2: P, s3: P, s0: P, s1: P, oe: P) -> Self {
        Self::from_parts(s2, s3, Some((s0, s1)), Some(oe))
    }

    const fn from_parts(s2: P, s3: P, scale: Option<(P, P)>, oe: Option<P>) -> Self {
        Self {
            s2,
            s3,
            scale,
            oe,
            filter: FilterSelection::Clear,
            frequency: FrequencyScale::High,
            active_frequency: FrequencyScale::High,
            enabled: true,
        }
    }

    /// Whether a dedicated output enable line is wired
    pub const fn has_true_enable_pin(&self) -> bool {
        self.oe.is_some()
    }

    /// Whether the prescaler lines are wired
    pub const fn has_scaler(&self) -> bool {
        self.scale.is_some()
    }

    pub const fn filter(&self) -> FilterSelection {
        self.filter
    }

    pub const fn frequency(&self) -> FrequencyScale {
        self.frequency
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Select the photodiode filter
    pub fn set_filter(&mut self, filter: FilterSelection) -> Result<(), P::Error> {
        let (s2, s3) = filter.levels();
        self.s2.set_state(s2)?;
        self.s3.set_state(s3)?;
        self.filter = filter;
        Ok(())
    }

    /// Select the output prescaler
    ///
    /// `Off` powers the output stage down. Without prescaler lines the setting
    /// is only recorded. While the output is disabled through the prescaler
    /// fallback the lines stay at `Off` and the scale is applied on enable.
    pub fn set_frequency(&mut self, frequency: FrequencyScale) -> Result<(), P::Error> {
        if self.enabled || self.oe.is_some() {
            self.write_frequency(frequency)?;
            self.frequency = frequency;
        }
        if !frequency.is_off() {
            self.active_frequency = frequency;
        }
        Ok(())
    }

    /// Enable or disable the sensor output
    ///
    /// With an OE line this is instantaneous and leaves the prescaler alone.
    /// Without one, disabling writes `Off` to the prescaler lines and enabling
    /// restores the last active scale, so a scale of `Off` set through
    /// [`Self::set_frequency`] is replaced on the next enable.
    pub fn set_enable(&mut self, on: bool) -> Result<(), P::Error> {
        if let Some(oe) = self.oe.as_mut() {
            oe.set_state(PinState::from(!on))?;
        } else {
            let frequency = if on {
                self.active_frequency
            } else {
                FrequencyScale::Off
            };
            self.write_frequency(frequency)?;
            self.frequency = frequency;
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Controller.set_enable] enabled={:?} via_oe={:?}",
            on,
            self.oe.is_some()
        );

        self.enabled = on;
        Ok(())
    }

    fn write_frequency(&mut self, frequency: FrequencyScale) -> Result<(), P::Error> {
        let Some((s0, s1)) = self.scale.as_mut() else {
            return Ok(());
        };
        let (l0, l1) = frequency.levels();
        s0.set_state(l0)?;
        s1.set_state(l1)?;
        Ok(())
    }

    /// Give the lines back
    pub fn release(self) -> SelectorPins<P> {
        SelectorPins {
            s2: self.s2,
            s3: self.s3,
            scale: self.scale,
            oe: self.oe,
        }
    }
}
