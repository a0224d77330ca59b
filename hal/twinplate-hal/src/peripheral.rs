//! Peripheral capability interface
//!
//! One button and one heating plate make up a [`Channel`]. The board owns
//! two of each plus a single timing unit that produces both the base tick
//! and the fast compare tick.

/// Button/plate pair identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// First plate and its button
    A,
    /// Second plate and its button
    B,
}

impl Channel {
    /// Both channels, in evaluation order
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    /// Array index for per-channel storage
    pub const fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }
}

/// Sleep depth requested by the control logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Timer keeps running; base and fast ticks are delivered
    #[default]
    Light,
    /// Timer halted; only a button edge brings the board back
    Deep,
}

impl PowerMode {
    /// Check if the timing unit is allowed to run in this mode
    pub fn ticks_running(&self) -> bool {
        matches!(self, PowerMode::Light)
    }
}

/// Hardware capabilities consumed by the control logic
///
/// Register-level setup (clock selection, pin direction, pulls, interrupt
/// polarity) happens before any of these methods are used. Implementations
/// must not block.
pub trait Peripheral {
    /// Put the board into its initial state: outputs low, timer cleared
    fn configure(&mut self);

    /// Sample a button
    ///
    /// Returns `true` while the button is pressed. Buttons are wired
    /// active-low; the inversion happens in the implementation.
    fn read_button(&mut self, channel: Channel) -> bool;

    /// Drive a plate output high (`true`) or low
    fn set_output(&mut self, channel: Channel, high: bool);

    /// Start delivering the periodic base tick
    fn arm_base_tick(&mut self);

    /// Load the shared compare register for the fast tick
    fn arm_fast_tick(&mut self, compare: u16);

    /// Current value of the shared compare register
    fn fast_compare(&self) -> u16;

    /// Reset the fast tick counter to zero
    fn reset_fast_counter(&mut self);

    /// Switch between keeping the timer alive and halting it
    fn set_power_mode(&mut self, mode: PowerMode);
}
