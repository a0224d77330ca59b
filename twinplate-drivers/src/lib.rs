//! Hardware driver implementations
//!
//! This crate provides a concrete [`twinplate_hal::Peripheral`] for boards
//! that expose their buttons and plates as `embedded-hal` pins:
//!
//! - [`timer::CompareTimer`]: up-counting timer with one compare register,
//!   shared by the base tick and the PWM phases
//! - [`board::PinBoard`]: buttons, plates and the timer behind one
//!   `Peripheral`

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod timer;

pub use board::{PinBoard, ServiceOutcome};
pub use timer::{CompareTimer, TimerEvents};
