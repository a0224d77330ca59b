//! Shared compare timer
//!
//! Counts sub-ticks from 0 up to `top` and wraps. Reaching `top` is the base
//! tick; reaching `compare` is the PWM compare match. Both events come from
//! the same counter, so they can never drift apart.

/// Events raised by one timer step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerEvents {
    /// Counter reached `top`
    pub base_tick: bool,
    /// Counter reached the compare register
    pub compare_match: bool,
}

impl TimerEvents {
    /// No events
    pub const NONE: Self = Self {
        base_tick: false,
        compare_match: false,
    };

    /// Check if anything fired
    pub fn any(&self) -> bool {
        self.base_tick || self.compare_match
    }
}

/// Up-counting timer with one compare channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompareTimer {
    /// Highest counter value before wrapping
    top: u16,
    /// Current counter value
    counter: u16,
    /// Compare register
    compare: u16,
    /// Clock running
    running: bool,
}

impl CompareTimer {
    /// Create a stopped, cleared timer
    pub const fn new(top: u16) -> Self {
        Self {
            top,
            counter: 0,
            compare: 0,
            running: false,
        }
    }

    /// Advance one sub-tick
    pub fn step(&mut self) -> TimerEvents {
        if !self.running {
            return TimerEvents::NONE;
        }

        self.counter = if self.counter >= self.top {
            0
        } else {
            self.counter + 1
        };

        TimerEvents {
            base_tick: self.counter == self.top,
            compare_match: self.counter == self.compare,
        }
    }

    /// Start or resume counting
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting; the counter keeps its value
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Stop and clear the counter
    pub fn clear(&mut self) {
        self.running = false;
        self.counter = 0;
    }

    /// Load the compare register
    pub fn set_compare(&mut self, compare: u16) {
        self.compare = compare;
    }

    /// Compare register
    pub fn compare(&self) -> u16 {
        self.compare
    }

    /// Reset the counter to zero without stopping
    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    /// Current counter value
    pub fn counter(&self) -> u16 {
        self.counter
    }

    /// Highest counter value
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Check if the clock is running
    pub fn is_running(&self) -> bool {
        self.running
    }
}
