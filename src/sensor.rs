//! Sensor driver
//!
//! Ties the select lines, the edge counter and the read cycle together.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::calibration::Calibration;
use crate::controller::{Controller, SelectorPins};
use crate::counter::FrequencyCounter;
use crate::error::Error;
use crate::read_cycle::{Action, ReadState};
use crate::reading::{ColorReading, RawReading, count_to_raw};
use crate::selector::{FilterSelection, FrequencyScale};

/// Default number of gate windows per second (100 ms gates)
pub const DEFAULT_SAMPLING_DIVISOR: u8 = 10;

/// Default slack past the gate end before a measurement counts as stalled
pub const DEFAULT_TIMEOUT_MARGIN: Duration = Duration::from_millis(100);

/// Configuration for the sensor driver
#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Subdivision of one second into gate windows
    pub sampling_divisor: u8,
    /// Prescaler applied by [`Tcs230::init`]
    pub frequency: FrequencyScale,
    pub calibration: Calibration,
    /// Extra wait after a gate window before giving up
    pub timeout_margin: Duration,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sampling_divisor: DEFAULT_SAMPLING_DIVISOR,
            frequency: FrequencyScale::High,
            calibration: Calibration::default(),
            timeout_margin: DEFAULT_TIMEOUT_MARGIN,
        }
    }
}

/// TCS230 color sensor driver
///
/// Reads are either asynchronous ([`Self::start_read`] followed by periodic
/// [`Self::poll`]) or blocking ([`Self::read_single`]). Both measure red,
/// green and blue one after another, since the counter can only run one gate
/// window at a time.
///
/// # Usage
///
/// ```ignore
/// let mut sensor = Tcs230::new(controller, counter, &SensorConfig::default());
/// sensor.init()?;
/// sensor.start_read()?;
///
/// loop {
///     if sensor.poll()? {
///         let color = sensor.color_reading();
///         sensor.start_read()?;
///     }
///     // other work
/// }
/// ```
pub struct Tcs230<P, C> {
    controller: Controller<P>,
    counter: C,
    config: SensorConfig,

    state: ReadState,
    /// Counts collected by the cycle in flight
    pending: RawReading,
    /// Last complete reading
    raw: RawReading,
    available: bool,
    deadline: Option<Instant>,
}

impl<P: OutputPin, C: FrequencyCounter> Tcs230<P, C> {
    /// Create a driver; nothing is written to the lines until [`Self::init`]
    pub fn new(controller: Controller<P>, counter: C, config: &SensorConfig) -> Self {
        let mut config = config.clone();
        if config.sampling_divisor == 0 {
            config.sampling_divisor = DEFAULT_SAMPLING_DIVISOR;
        }
        Self {
            controller,
            counter,
            config,
            state: ReadState::Idle,
            pending: RawReading::default(),
            raw: RawReading::default(),
            available: false,
            deadline: None,
        }
    }

    /// Drive every line to a known state: clear filter, configured
    /// prescaler, output enabled
    ///
    /// Without an OE line, enabling goes through the prescaler, so a
    /// configured `Off` scale leaves the output suppressed.
    pub fn init(&mut self) -> Result<(), Error<P::Error>> {
        self.controller.set_filter(FilterSelection::Clear)?;
        self.controller.set_frequency(self.config.frequency)?;
        if self.controller.has_true_enable_pin() || !self.config.frequency.is_off() {
            self.controller.set_enable(true)?;
        }
        Ok(())
    }

    /// Start an asynchronous read cycle
    ///
    /// Selects the red filter and opens the first gate window. Clears
    /// availability until the new cycle completes.
    pub fn start_read(&mut self) -> Result<(), Error<P::Error>> {
        if self.state.is_busy() {
            return Err(Error::Busy);
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Tcs230.start_read] gate={:?}ms",
            self.gate_time().as_millis()
        );

        self.available = false;
        self.pending = RawReading::default();
        self.state = ReadState::start();
        self.advance(false)
    }

    /// Advance the read cycle
    ///
    /// Call this from the main loop while a cycle is in flight. Returns `true`
    /// once a complete reading is available; outside a cycle it only reports
    /// the current availability.
    pub fn poll(&mut self) -> Result<bool, Error<P::Error>> {
        if let ReadState::Measuring(_) = self.state {
            let ready = self.counter.is_ready();
            if !ready && self.deadline_passed() {
                self.abort();
                return Err(Error::Timeout);
            }
            self.advance(ready)?;
        }
        Ok(self.available)
    }

    /// Whether the last cycle finished and its reading is current
    pub const fn is_available(&self) -> bool {
        self.available
    }

    /// Run a complete read cycle, blocking for three gate windows
    pub fn read_single(&mut self) -> Result<RawReading, Error<P::Error>> {
        self.start_read()?;
        while !self.poll()? {
            core::hint::spin_loop();
        }
        Ok(self.raw)
    }

    /// Count one gate window on `filter`, blocking
    ///
    /// The filter stays selected afterwards.
    pub fn read_filter(&mut self, filter: FilterSelection) -> Result<u32, Error<P::Error>> {
        if self.state.is_busy() {
            return Err(Error::Busy);
        }
        self.controller.set_filter(filter)?;
        self.start_gate();
        while !self.counter.is_ready() {
            if self.deadline_passed() {
                self.counter.stop();
                self.deadline = None;
                return Err(Error::Timeout);
            }
            core::hint::spin_loop();
        }
        self.deadline = None;
        Ok(self.counter.count())
    }

    /// Last complete raw reading
    pub const fn raw_reading(&self) -> RawReading {
        self.raw
    }

    /// Last complete reading, calibrated
    pub fn color_reading(&self) -> ColorReading {
        self.config.calibration.apply(&self.raw)
    }

    /// Select a filter manually, outside of a read cycle
    pub fn set_filter(&mut self, filter: FilterSelection) -> Result<(), Error<P::Error>> {
        if self.state.is_busy() {
            return Err(Error::Busy);
        }
        self.controller.set_filter(filter)?;
        Ok(())
    }

    /// Set the output prescaler
    ///
    /// Independent of the sampling divisor: the gate window stays the same,
    /// only the number of counted edges changes.
    pub fn set_frequency_scale(&mut self, frequency: FrequencyScale) -> Result<(), Error<P::Error>> {
        self.controller.set_frequency(frequency)?;
        self.config.frequency = frequency;

        #[cfg(feature = "esp32-log")]
        println!("[Tcs230.set_frequency_scale] frequency={:?}", frequency);

        Ok(())
    }

    /// Enable or disable the sensor output, see [`Controller::set_enable`]
    pub fn set_enable(&mut self, on: bool) -> Result<(), Error<P::Error>> {
        self.controller.set_enable(on)?;
        Ok(())
    }

    /// Set the number of gate windows per second
    ///
    /// Takes effect with the next gate window.
    pub fn set_sampling_divisor(&mut self, divisor: u8) -> Result<(), Error<P::Error>> {
        if divisor == 0 {
            return Err(Error::InvalidConfig);
        }
        self.config.sampling_divisor = divisor;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Tcs230.set_sampling_divisor] divisor={:?} gate={:?}ms",
            divisor,
            self.gate_time().as_millis()
        );

        Ok(())
    }

    pub fn set_dark_calibration(&mut self, dark: RawReading) {
        self.config.calibration.dark = dark;
    }

    pub fn set_white_calibration(&mut self, white: RawReading) {
        self.config.calibration.white = white;
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.config.calibration = calibration;
    }

    pub const fn calibration(&self) -> &Calibration {
        &self.config.calibration
    }

    pub const fn sampling_divisor(&self) -> u8 {
        self.config.sampling_divisor
    }

    /// Length of one gate window
    pub fn gate_time(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.config.sampling_divisor))
    }

    pub const fn state(&self) -> ReadState {
        self.state
    }

    pub const fn filter(&self) -> FilterSelection {
        self.controller.filter()
    }

    pub const fn frequency_scale(&self) -> FrequencyScale {
        self.controller.frequency()
    }

    pub const fn is_enabled(&self) -> bool {
        self.controller.is_enabled()
    }

    /// Give back the lines and the counter
    pub fn release(self) -> (SelectorPins<P>, C) {
        (self.controller.release(), self.counter)
    }

    /// Step the state machine until it waits on the counter or rests
    fn advance(&mut self, ready: bool) -> Result<(), Error<P::Error>> {
        let mut ready = ready;
        loop {
            let transition = self.state.step(ready);
            ready = false;
            for action in transition.actions {
                if let Err(error) = self.perform(action) {
                    self.abort();
                    return Err(error);
                }
            }
            self.state = transition.next;
            if self.state.is_settled() {
                return Ok(());
            }
        }
    }

    fn perform(&mut self, action: Action) -> Result<(), Error<P::Error>> {
        match action {
            Action::SelectFilter(channel) => {
                self.controller.set_filter(channel.filter())?;
            }
            Action::StartGate => self.start_gate(),
            Action::Record(channel) => {
                self.pending[channel] = count_to_raw(self.counter.count());
                self.deadline = None;
            }
            Action::Publish => {
                self.raw = self.pending;
                self.available = true;

                #[cfg(feature = "esp32-log")]
                println!(
                    "[Tcs230.publish] raw=({:?}, {:?}, {:?})",
                    self.raw.r, self.raw.g, self.raw.b
                );
            }
        }
        Ok(())
    }

    fn start_gate(&mut self) {
        let gate = self.gate_time();
        self.counter.start(gate);
        self.deadline = Some(Instant::now() + gate + self.config.timeout_margin);
    }

    fn deadline_passed(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Drop the cycle in flight
    fn abort(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[Tcs230.abort] cycle abandoned in {:?}", self.state);

        self.counter.stop();
        self.deadline = None;
        self.state = ReadState::Idle;
    }
}
