//! Sleep depth arbitration
//!
//! The deep state halts the timer entirely, so it is only allowed when there
//! is nothing left to time: no plate heating and no debounce window open.

use twinplate_hal::PowerMode;

/// Inputs to the sleep decision, sampled at the end of a base tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepInputs {
    /// Output active flags
    pub active: [bool; 2],
    /// Debounced button states (true = pressed)
    pub pressed: [bool; 2],
    /// Raw button reads (true = pressed)
    pub raw_pressed: [bool; 2],
}

impl SleepInputs {
    /// Check if the timer may be halted
    pub fn deep_sleep_eligible(&self) -> bool {
        let idle = |flags: [bool; 2]| !flags[0] && !flags[1];
        idle(self.active) && idle(self.pressed) && idle(self.raw_pressed)
    }

    /// Sleep depth these inputs call for
    pub fn mode(&self) -> PowerMode {
        if self.deep_sleep_eligible() {
            PowerMode::Deep
        } else {
            PowerMode::Light
        }
    }
}
