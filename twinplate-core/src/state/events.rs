//! Events produced by a base tick

use heapless::Vec;
use twinplate_hal::{Channel, PowerMode};

/// Upper bound on events in one tick: two confirmations, two output
/// switches, a shutoff, and a power change
pub const MAX_TICK_EVENTS: usize = 6;

/// Something observable that happened during a base tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Debounced button state changed
    ButtonConfirmed { channel: Channel, pressed: bool },
    /// Plate heating switched on or off
    OutputSwitched { channel: Channel, on: bool },
    /// Idle countdown expired; both plates forced off
    IdleShutoff,
    /// Requested sleep depth changed
    PowerModeChanged(PowerMode),
}

impl ControlEvent {
    /// Check if this event came from a button
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            ControlEvent::ButtonConfirmed { .. } | ControlEvent::OutputSwitched { .. }
        )
    }
}

/// Everything that happened during one base tick, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Events in the order they occurred
    pub events: Vec<ControlEvent, MAX_TICK_EVENTS>,
}

impl TickReport {
    /// Create an empty report
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record an event
    pub(crate) fn push(&mut self, event: ControlEvent) {
        // Capacity covers the worst case of a single tick
        let _ = self.events.push(event);
    }

    /// Check if nothing happened
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check if the idle shutoff fired
    pub fn shutoff(&self) -> bool {
        self.events.contains(&ControlEvent::IdleShutoff)
    }

    /// Output switches reported this tick
    pub fn switched(&self) -> impl Iterator<Item = (Channel, bool)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            ControlEvent::OutputSwitched { channel, on } => Some((channel, on)),
            _ => None,
        })
    }
}
