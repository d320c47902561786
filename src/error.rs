/// Errors reported by the sensor driver
///
/// `E` is the error type of the select/enable output lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Driving an output line failed
    Pin(E),
    /// A read cycle is already in flight
    Busy,
    /// The counter did not report ready within the gate window plus margin
    Timeout,
    /// Configuration value out of range
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Pin(error)
    }
}
