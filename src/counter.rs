//! Gated pulse counting
//!
//! [`FrequencyCounter`] is the seam to whatever counts the sensor's output
//! edges. [`EdgeCounter`] is a portable implementation for setups where an
//! edge interrupt bumps a shared tally and the gate is timed with
//! `embassy_time`.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};

/// Counts output edges over a gate window
///
/// Only one count may be in flight. Starting a new one before the previous
/// result was taken discards the previous result.
pub trait FrequencyCounter {
    /// Start counting for `gate`
    fn start(&mut self, gate: Duration);

    /// Whether the current gate window has closed
    fn is_ready(&mut self) -> bool;

    /// Edges seen during the last closed window
    fn count(&mut self) -> u32;

    /// Abandon the current window
    fn stop(&mut self) {}
}

/// Edge tally shared with an interrupt handler
///
/// Place it in a `static` and call [`Self::record_edge`] from the edge
/// interrupt.
pub struct EdgeTally {
    edges: Mutex<Cell<u32>>,
}

impl EdgeTally {
    pub const fn new() -> Self {
        Self {
            edges: Mutex::new(Cell::new(0)),
        }
    }

    /// Register one output edge
    pub fn record_edge(&self) {
        critical_section::with(|cs| {
            let edges = self.edges.borrow(cs);
            edges.set(edges.get().wrapping_add(1));
        });
    }

    /// Total edges seen so far, wrapping
    pub fn total(&self) -> u32 {
        critical_section::with(|cs| self.edges.borrow(cs).get())
    }
}

impl Default for EdgeTally {
    fn default() -> Self {
        Self::new()
    }
}

/// Gated counter over an [`EdgeTally`]
///
/// The window is closed by polling, so it may run past the gate. The edges
/// seen up to the closing poll are scaled back to the gate length, which
/// assumes a steady output frequency over the window.
pub struct EdgeCounter<'a> {
    tally: &'a EdgeTally,
    /// Tally snapshot when the window opened
    start_total: u32,
    /// Window start and gate length
    window: Option<(Instant, Duration)>,
    latched: Option<u32>,
}

impl<'a> EdgeCounter<'a> {
    pub const fn new(tally: &'a EdgeTally) -> Self {
        Self {
            tally,
            start_total: 0,
            window: None,
            latched: None,
        }
    }

    /// Open a window at `now`
    pub fn start_at(&mut self, gate: Duration, now: Instant) {
        self.start_total = self.tally.total();
        self.window = Some((now, gate));
        self.latched = None;
    }

    /// Close the window if `now` is past its end
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if self.latched.is_some() {
            return true;
        }
        let Some((started, gate)) = self.window else {
            return false;
        };
        if now < started + gate {
            return false;
        }
        let edges = self.tally.total().wrapping_sub(self.start_total);
        self.latched = Some(scale_to_gate(edges, gate, now.duration_since(started)));
        self.window = None;
        true
    }
}

/// Rescale `edges` counted over `elapsed` to a window of `gate`, rounded
fn scale_to_gate(edges: u32, gate: Duration, elapsed: Duration) -> u32 {
    let elapsed_us = elapsed.as_micros();
    if elapsed_us <= gate.as_micros() {
        return edges;
    }
    let scaled = (u64::from(edges) * gate.as_micros() + elapsed_us / 2) / elapsed_us;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

impl FrequencyCounter for EdgeCounter<'_> {
    fn start(&mut self, gate: Duration) {
        self.start_at(gate, Instant::now());
    }

    fn is_ready(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    fn count(&mut self) -> u32 {
        self.latched.take().unwrap_or(0)
    }

    fn stop(&mut self) {
        self.window = None;
        self.latched = None;
    }
}
