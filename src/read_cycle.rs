//! Read cycle state machine
//!
//! The cycle visits red, green and blue in turn. Each visit selects the
//! filter, opens one gate window and waits for the counter to report.
//!
//! [`ReadState::step`] is pure: it takes the current state and whether the
//! counter is ready, and returns the next state together with the actions the
//! driver has to carry out. The driver keeps stepping until the state settles
//! in `Measuring`, `Idle` or after `Done`.

use heapless::Vec;

use crate::reading::ColorChannel;

/// Maximum number of actions a single step emits
pub const MAX_ACTIONS: usize = 2;

/// Current step of the read cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadState {
    /// No cycle in flight
    #[default]
    Idle,
    /// About to select the filter for the channel
    SelectFilter(ColorChannel),
    /// Gate window open for the channel
    Measuring(ColorChannel),
    /// All three channels recorded
    Done,
}

/// Side effects requested by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Drive the filter lines for the channel
    SelectFilter(ColorChannel),
    /// Start a gated count
    StartGate,
    /// Store the finished count for the channel
    Record(ColorChannel),
    /// Mark the raw triple as fresh
    Publish,
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ReadState,
    pub actions: Vec<Action, MAX_ACTIONS>,
}

impl Transition {
    fn stay(state: ReadState) -> Self {
        Self {
            next: state,
            actions: Vec::new(),
        }
    }

    fn to(next: ReadState, actions: &[Action]) -> Self {
        let mut list = Vec::new();
        let fits = list.extend_from_slice(actions);
        debug_assert!(fits.is_ok(), "step emitted more than MAX_ACTIONS actions");
        Self {
            next,
            actions: list,
        }
    }
}

impl ReadState {
    /// State entered by starting a cycle
    pub const fn start() -> Self {
        Self::SelectFilter(ColorChannel::Red)
    }

    /// A cycle is in flight
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::SelectFilter(_) | Self::Measuring(_))
    }

    /// Whether the state waits on something external
    ///
    /// Settled states are left only by a new counter reading or a new cycle.
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Idle | Self::Measuring(_))
    }

    /// Advance by one step given the counter's readiness
    pub fn step(self, ready: bool) -> Transition {
        match self {
            Self::Idle => Transition::stay(self),
            Self::SelectFilter(channel) => Transition::to(
                Self::Measuring(channel),
                &[Action::SelectFilter(channel), Action::StartGate],
            ),
            Self::Measuring(_) if !ready => Transition::stay(self),
            Self::Measuring(channel) => {
                let next = match channel.next() {
                    Some(next) => Self::SelectFilter(next),
                    None => Self::Done,
                };
                Transition::to(next, &[Action::Record(channel)])
            }
            Self::Done => Transition::to(Self::Idle, &[Action::Publish]),
        }
    }
}
