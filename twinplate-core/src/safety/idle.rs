//! Idle auto-shutoff countdown
//!
//! Counts base ticks since the last confirmed button toggle. The counter is
//! decremented with wrapping arithmetic; hitting zero is the shutoff
//! condition, after which it simply keeps counting down from `u16::MAX`.

/// Idle countdown shared by both channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleCountdown {
    /// Ticks left before shutoff
    remaining: u16,
    /// Value restored on every toggle
    max: u16,
}

impl IdleCountdown {
    /// Create a countdown starting at its maximum
    pub const fn new(max: u16) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    /// Restart the countdown (a button toggle was confirmed)
    pub fn reset(&mut self) {
        self.remaining = self.max;
    }

    /// Advance one base tick
    ///
    /// Returns `true` on the tick the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.wrapping_sub(1);
        self.remaining == 0
    }

    /// Ticks left before shutoff
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Configured maximum
    pub fn max(&self) -> u16 {
        self.max
    }
}
