//! Plate output handling

pub mod pwm;

pub use pwm::{OutputChannel, Phase, PhaseSchedule, PwmDriver, PwmStep};
